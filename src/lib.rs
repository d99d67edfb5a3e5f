// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Density Checker
//!
//! Measures the geometric density of every object in a snapshot (faces per
//! unit area for meshes, segments per unit length for polylines) and judges
//! the whole collection against a per-object threshold and a limit on the
//! fraction of high-density objects.

pub mod analysis;
pub mod config;
pub mod density;
pub mod error;
pub mod geometry;
pub mod io;
pub mod report;
pub mod utils;

pub use analysis::{classify, AnalysisReport, Analyzer, ExceedFlag, RunVerdict, VerdictStatus};
pub use config::{AnalysisConfig, MalformedPolicy};
pub use density::{compute_density, object_density, DensityCache};
pub use error::{DensityError, Result};
pub use geometry::{Geometry, GeometryObject, MeshData, PolylineData};

/// Analyze a snapshot file with the given configuration
pub fn analyze_file(path: impl AsRef<std::path::Path>, config: AnalysisConfig) -> Result<AnalysisReport> {
    let snapshot = io::read_snapshot(path)?;
    let fingerprint = snapshot.fingerprint.clone();
    let mut objects = snapshot.into_displayable();
    let report = Analyzer::new(config).run(&mut objects)?;
    Ok(report.with_snapshot(fingerprint))
}
