// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Density metrics for meshes and polylines

use crate::error::Result;
use crate::geometry::{Geometry, GeometryObject, MeshData, PolylineData};

/// Density of a single geometry.
///
/// Meshes measure faces per unit area, or faces per unit of perimeter edge
/// length when no area is known. Polylines measure segments per unit length.
/// Undefined ratios and unmeasured kinds are zero.
pub fn compute_density(geometry: &Geometry) -> Result<f64> {
    match geometry {
        Geometry::Mesh(mesh) => mesh_density(mesh),
        Geometry::Polyline(line) => polyline_density(line),
        Geometry::Other => Ok(0.0),
    }
}

/// Mean density over an object's display geometries
pub fn object_density(object: &GeometryObject) -> Result<f64> {
    let geometries = object.display_geometries();
    if geometries.is_empty() {
        return Ok(0.0);
    }

    let mut sum = 0.0;
    for geometry in &geometries {
        sum += compute_density(geometry).map_err(|e| e.for_object(&object.id))?;
    }

    Ok(sum / geometries.len() as f64)
}

fn mesh_density(mesh: &MeshData) -> Result<f64> {
    mesh.validate()?;
    let face_count = mesh.face_count()? as f64;

    // Non-positive area is treated as unset
    if mesh.area > 0.0 {
        return Ok(face_count / mesh.area);
    }

    let edge_length = mesh.perimeter_edge_length()?;
    Ok(safe_ratio(face_count, edge_length))
}

fn polyline_density(line: &PolylineData) -> Result<f64> {
    let segments = line.segment_count()? as f64;
    Ok(safe_ratio(segments, line.length))
}

fn safe_ratio(count: f64, measure: f64) -> f64 {
    if measure > 0.0 {
        count / measure
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mesh(vertices: Vec<f64>, faces: Vec<usize>, area: f64) -> Geometry {
        Geometry::Mesh(MeshData::new(vertices, faces).with_area(area))
    }

    /// Five degenerate triangles whose perimeters sum to 10
    fn five_faces_edge_ten() -> Geometry {
        // edge 0-1 has length 1; triangle (0, 1, 0) has perimeter 1 + 1 + 0 = 2
        mesh(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![3, 0, 1, 0, 3, 0, 1, 0, 3, 0, 1, 0, 3, 0, 1, 0, 3, 0, 1, 0],
            0.0,
        )
    }

    #[test]
    fn test_mesh_density_by_area() {
        let geometry = mesh(vec![0.0; 12], vec![3, 0, 1, 2, 3, 1, 2, 3], 4.0);
        assert_relative_eq!(compute_density(&geometry).unwrap(), 0.5);
    }

    #[test]
    fn test_mesh_density_falls_back_to_edge_length() {
        assert_relative_eq!(compute_density(&five_faces_edge_ten()).unwrap(), 0.5);
    }

    #[test]
    fn test_mesh_density_undefined_is_zero() {
        let geometry = mesh(vec![0.0; 9], vec![3, 0, 1, 2], 0.0);
        assert_eq!(compute_density(&geometry).unwrap(), 0.0);
    }

    #[test]
    fn test_out_of_range_index_with_area_is_malformed() {
        let geometry = mesh(vec![0.0; 9], vec![3, 0, 1, 99], 2.0);
        assert!(compute_density(&geometry).unwrap_err().is_malformed());
    }

    #[test]
    fn test_ragged_vertices_with_area_is_malformed() {
        let geometry = mesh(vec![0.0; 10], vec![3, 0, 1, 2], 2.0);
        assert!(compute_density(&geometry).unwrap_err().is_malformed());
    }

    #[test]
    fn test_polyline_density() {
        let line = Geometry::Polyline(PolylineData::new(vec![0.0; 12], 3.0));
        assert_relative_eq!(compute_density(&line).unwrap(), 1.0);

        let unset = Geometry::Polyline(PolylineData::new(vec![0.0; 12], 0.0));
        assert_eq!(compute_density(&unset).unwrap(), 0.0);
    }

    #[test]
    fn test_other_kind_is_zero() {
        assert_eq!(compute_density(&Geometry::Other).unwrap(), 0.0);
    }

    #[test]
    fn test_object_density_is_mean_of_display_geometries() {
        let object = GeometryObject::composite(
            "wall",
            vec![
                Geometry::Polyline(PolylineData::new(vec![0.0; 12], 3.0)),
                five_faces_edge_ten(),
                Geometry::Other,
            ],
        );
        assert_relative_eq!(object_density(&object).unwrap(), 0.75);
    }

    #[test]
    fn test_object_without_display_geometry_is_zero() {
        let object = GeometryObject::new("empty", Geometry::Other);
        assert_eq!(object_density(&object).unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_error_names_object() {
        let object = GeometryObject::new(
            "broken",
            Geometry::Polyline(PolylineData::new(vec![0.0; 7], 1.0)),
        );
        let err = object_density(&object).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
