// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon mesh payload

use super::faces::{count_faces, FaceDecoder};
use crate::error::{DensityError, Result};
use nalgebra::{distance, Point3};
use serde::{Deserialize, Serialize};

/// Mesh with flat vertex coordinates and a packed face buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex coordinates as consecutive (x, y, z) triples
    pub vertices: Vec<f64>,
    /// Packed face records, see [`super::faces`]
    pub faces: Vec<usize>,
    /// Precomputed surface area; zero means unknown
    #[serde(default)]
    pub area: f64,
}

impl MeshData {
    pub fn new(vertices: Vec<f64>, faces: Vec<usize>) -> Self {
        Self {
            vertices,
            faces,
            area: 0.0,
        }
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    /// Number of complete vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Get a vertex position by index
    pub fn vertex(&self, index: usize) -> Result<Point3<f64>> {
        let base = index
            .checked_mul(3)
            .filter(|base| *base < self.vertices.len().saturating_sub(2))
            .ok_or_else(|| {
                DensityError::malformed(format!(
                    "vertex index {} out of range ({} vertices)",
                    index,
                    self.vertex_count()
                ))
            })?;

        Ok(Point3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        ))
    }

    /// Number of faces in the packed buffer
    pub fn face_count(&self) -> Result<usize> {
        count_faces(&self.faces)
    }

    /// Check the vertex buffer and every face index against it
    pub fn validate(&self) -> Result<()> {
        self.check_vertices()?;

        let vertex_count = self.vertex_count();
        for face in FaceDecoder::new(&self.faces) {
            if let Some(index) = face?.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(DensityError::malformed(format!(
                    "vertex index {} out of range ({} vertices)",
                    index, vertex_count
                )));
            }
        }
        Ok(())
    }

    /// Sum of every face's closed perimeter
    pub fn perimeter_edge_length(&self) -> Result<f64> {
        self.check_vertices()?;

        let mut total = 0.0;
        for face in FaceDecoder::new(&self.faces) {
            for (from, to) in face?.edges() {
                total += distance(&self.vertex(from)?, &self.vertex(to)?);
            }
        }

        Ok(total)
    }

    fn check_vertices(&self) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(DensityError::malformed(format!(
                "mesh vertex buffer length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        Ok(())
    }
}
