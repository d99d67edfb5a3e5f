// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry objects received from the host

use super::{MeshData, PolylineData};
use serde::{Deserialize, Serialize};

/// Renderable payload of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Mesh(MeshData),
    Polyline(PolylineData),
    /// Any kind this engine does not measure
    #[default]
    #[serde(other)]
    Other,
}

impl Geometry {
    /// Whether this geometry has a density metric
    pub fn is_renderable(&self) -> bool {
        matches!(self, Geometry::Mesh(_) | Geometry::Polyline(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Mesh(_) => "mesh",
            Geometry::Polyline(_) => "polyline",
            Geometry::Other => "other",
        }
    }
}

/// Display material attached after analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderMaterial {
    pub name: String,
    /// Linear RGB in [0, 1]
    pub diffuse: [f64; 3],
    pub opacity: f64,
}

/// One displayable object of the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The object's own geometry
    #[serde(default)]
    pub geometry: Geometry,
    /// Geometries a composite object renders as
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display_value: Vec<Geometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_material: Option<RenderMaterial>,
}

impl GeometryObject {
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            name: None,
            geometry,
            display_value: Vec::new(),
            render_material: None,
        }
    }

    /// Composite object rendered through a list of display geometries
    pub fn composite(id: impl Into<String>, display_value: Vec<Geometry>) -> Self {
        Self {
            display_value,
            ..Self::new(id, Geometry::Other)
        }
    }

    /// Mesh and polyline geometries this object renders as.
    ///
    /// A non-empty display list takes precedence over the object's own geometry.
    pub fn display_geometries(&self) -> Vec<&Geometry> {
        if self.display_value.is_empty() {
            if self.geometry.is_renderable() {
                vec![&self.geometry]
            } else {
                Vec::new()
            }
        } else {
            self.display_value
                .iter()
                .filter(|g| g.is_renderable())
                .collect()
        }
    }

    /// Has a non-empty id and something to render
    pub fn is_displayable(&self) -> bool {
        !self.id.is_empty() && !self.display_geometries().is_empty()
    }
}
