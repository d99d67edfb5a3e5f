// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - object model and mesh/polyline payloads

pub mod faces;
mod mesh;
mod object;
mod polyline;

pub use faces::{corrected_arity, decode_faces, Face, FaceDecoder};
pub use mesh::MeshData;
pub use object::{Geometry, GeometryObject, RenderMaterial};
pub use polyline::PolylineData;
