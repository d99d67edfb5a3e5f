// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Open polyline payload

use crate::error::{DensityError, Result};
use serde::{Deserialize, Serialize};

/// Open polyline through consecutive vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineData {
    /// Vertex coordinates as consecutive (x, y, z) triples
    pub vertices: Vec<f64>,
    /// Precomputed length; zero means unknown
    #[serde(default)]
    pub length: f64,
}

impl PolylineData {
    pub fn new(vertices: Vec<f64>, length: f64) -> Self {
        Self { vertices, length }
    }

    /// Number of segments between consecutive vertices (no closing edge)
    pub fn segment_count(&self) -> Result<usize> {
        if self.vertices.len() % 3 != 0 {
            return Err(DensityError::malformed(format!(
                "polyline coordinate length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        Ok((self.vertices.len() / 3).saturating_sub(1))
    }
}
