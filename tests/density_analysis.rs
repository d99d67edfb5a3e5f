// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end density analysis tests

use anyhow::Result;
use approx::assert_relative_eq;
use density_checker::analysis::NO_ELIGIBLE_OBJECTS;
use density_checker::io::{displayable, read_snapshot, write_snapshot};
use density_checker::{
    AnalysisConfig, Analyzer, Geometry, GeometryObject, MalformedPolicy, MeshData, PolylineData,
    VerdictStatus,
};
use tempfile::NamedTempFile;

/// Polyline with `segments` segments and the given length
fn polyline(id: &str, segments: usize, length: f64) -> GeometryObject {
    let vertices = (0..=segments)
        .flat_map(|i| [i as f64, 0.0, 0.0])
        .collect();
    GeometryObject::new(id, Geometry::Polyline(PolylineData::new(vertices, length)))
}

/// Unit cube as six quads, optionally with a known area
fn cube(id: &str, area: f64) -> GeometryObject {
    let vertices = vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
    ];
    // mixes explicit quad tokens with the legacy `1` token
    let faces = vec![
        4, 0, 3, 2, 1, //
        1, 4, 5, 6, 7, //
        4, 0, 1, 5, 4, //
        1, 1, 2, 6, 5, //
        4, 2, 3, 7, 6, //
        1, 3, 0, 4, 7,
    ];
    GeometryObject::new(id, Geometry::Mesh(MeshData::new(vertices, faces).with_area(area)))
}

/// Ten objects of which the first three have density 5, the others 1
fn ten_objects() -> Vec<GeometryObject> {
    (0..10)
        .map(|i| {
            if i < 3 {
                polyline(&format!("dense-{}", i), 5, 1.0)
            } else {
                polyline(&format!("sparse-{}", i), 2, 2.0)
            }
        })
        .collect()
}

#[test]
fn test_cube_density_by_area() -> Result<()> {
    let mut objects = vec![cube("cube", 6.0)];
    let report = Analyzer::new(AnalysisConfig::new(10.0, 0.0)).run(&mut objects)?;

    assert_relative_eq!(report.densities["cube"], 1.0);
    assert!(report.is_success());
    Ok(())
}

#[test]
fn test_cube_density_by_edge_length() -> Result<()> {
    // six quads, each with perimeter 4
    let mut objects = vec![cube("cube", 0.0)];
    let report = Analyzer::new(AnalysisConfig::new(10.0, 0.0)).run(&mut objects)?;

    assert_relative_eq!(report.densities["cube"], 6.0 / 24.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_ratio_above_limit_fails() -> Result<()> {
    let mut objects = ten_objects();
    let report = Analyzer::new(AnalysisConfig::new(2.0, 0.2)).run(&mut objects)?;

    assert_eq!(report.verdict.status, VerdictStatus::Failure);
    assert!(report.verdict.reason.contains("0.3000"));
    assert_eq!(
        report.verdict.exceeding_ids().collect::<Vec<_>>(),
        vec!["dense-0", "dense-1", "dense-2"]
    );
    Ok(())
}

#[test]
fn test_ratio_at_limit_passes() -> Result<()> {
    let mut objects = ten_objects();
    let report = Analyzer::new(AnalysisConfig::new(2.0, 0.3)).run(&mut objects)?;

    assert_eq!(report.verdict.status, VerdictStatus::Success);
    assert_eq!(report.verdict.flags.len(), 3);
    Ok(())
}

#[test]
fn test_empty_snapshot_fails_for_any_thresholds() -> Result<()> {
    for (threshold, limit) in [(0.1, 0.0), (100.0, 1.0)] {
        let report = Analyzer::new(AnalysisConfig::new(threshold, limit)).run(&mut [])?;
        assert_eq!(report.verdict.status, VerdictStatus::Failure);
        assert_eq!(report.verdict.reason, NO_ELIGIBLE_OBJECTS);
    }
    Ok(())
}

#[test]
fn test_runs_are_deterministic() -> Result<()> {
    let config = AnalysisConfig::new(2.0, 0.25);

    let mut first_objects = ten_objects();
    first_objects.push(cube("cube", 0.0));
    let mut second_objects = first_objects.clone();

    let first = Analyzer::new(config.clone()).run(&mut first_objects)?;
    let second = Analyzer::new(config).run(&mut second_objects)?;

    assert_eq!(first.verdict, second.verdict);
    assert_eq!(first.densities, second.densities);
    assert_eq!(first.cache, second.cache);
    Ok(())
}

#[test]
fn test_each_object_measured_once() -> Result<()> {
    let mut objects = ten_objects();
    let report = Analyzer::new(AnalysisConfig::new(2.0, 1.0)).run(&mut objects)?;

    assert_eq!(report.cache.computations, 10);
    assert_eq!(report.cache.entries, 10);
    Ok(())
}

#[test]
fn test_malformed_object_skipped_or_aborted() -> Result<()> {
    let broken = GeometryObject::new(
        "broken",
        Geometry::Mesh(MeshData::new(vec![0.0; 9], vec![3, 0, 1, 2, 4, 0, 1])),
    );

    let mut objects = vec![polyline("ok", 1, 1.0), broken.clone()];
    let skipped = Analyzer::new(AnalysisConfig::new(2.0, 0.5)).run(&mut objects)?;
    assert_eq!(skipped.densities["broken"], 0.0);
    assert_eq!(skipped.malformed, vec!["broken".to_string()]);
    assert!(skipped.is_success());

    let mut objects = vec![polyline("ok", 1, 1.0), broken];
    let config = AnalysisConfig::new(2.0, 0.5).with_policy(MalformedPolicy::Abort);
    let aborted = Analyzer::new(config).run(&mut objects)?;
    assert_eq!(aborted.verdict.status, VerdictStatus::Failure);
    assert!(aborted.verdict.reason.contains("broken"));
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() {
    let mut objects = ten_objects();
    assert!(Analyzer::new(AnalysisConfig::new(2.0, 1.5)).run(&mut objects).is_err());
    assert!(Analyzer::new(AnalysisConfig::new(0.0, 0.5)).run(&mut objects).is_err());
}

#[test]
fn test_composite_object_uses_mean_density() -> Result<()> {
    let composite = GeometryObject::composite(
        "assembly",
        vec![
            Geometry::Polyline(PolylineData::new(vec![0.0; 12], 1.0)),
            Geometry::Polyline(PolylineData::new(vec![0.0; 12], 3.0)),
        ],
    );
    let mut objects = vec![composite];
    let report = Analyzer::new(AnalysisConfig::new(1.5, 0.0)).run(&mut objects)?;

    assert_relative_eq!(report.densities["assembly"], 2.0);
    assert_eq!(report.verdict.status, VerdictStatus::Failure);
    Ok(())
}

#[test]
fn test_colored_snapshot_round_trip() -> Result<()> {
    let mut config = AnalysisConfig::new(2.0, 1.0);
    config.colorize = true;

    let mut objects = displayable(ten_objects());
    Analyzer::new(config).run(&mut objects)?;

    let file = NamedTempFile::with_suffix(".json")?;
    write_snapshot(&objects, file.path())?;
    let reloaded = read_snapshot(file.path())?;

    let dense = &reloaded.objects[0];
    assert_eq!(
        dense.render_material.as_ref().map(|m| m.name.as_str()),
        Some("density-exceeded")
    );
    assert_eq!(reloaded.objects[0].geometry, objects[0].geometry);
    Ok(())
}
