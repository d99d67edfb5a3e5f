// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Threshold classification and ratio aggregation

use super::verdict::{ExceedFlag, RunVerdict, VerdictStatus};
use crate::density::DensityCache;
use crate::geometry::GeometryObject;

/// Whether a density is above the per-object threshold.
///
/// Used for both flagging and the failure ratio; equality never exceeds.
pub fn exceeds(density: f64, threshold: f64) -> bool {
    density > threshold
}

/// Classify every object against `density_threshold` and judge the run
/// against `high_density_object_limit`.
///
/// Objects missing from `densities` count as density zero.
pub fn classify(
    objects: &[GeometryObject],
    densities: &DensityCache,
    density_threshold: f64,
    high_density_object_limit: f64,
) -> RunVerdict {
    if objects.is_empty() {
        return RunVerdict::no_eligible_objects();
    }

    let flags: Vec<ExceedFlag> = objects
        .iter()
        .filter_map(|object| {
            let density = densities.get(&object.id).unwrap_or(0.0);
            exceeds(density, density_threshold)
                .then(|| ExceedFlag::new(object.id.clone(), density, density_threshold))
        })
        .collect();

    let failed_count = flags.len();
    let total = objects.len();
    let ratio = failed_count as f64 / total as f64;

    let (status, reason) = if ratio > high_density_object_limit {
        (
            VerdictStatus::Failure,
            format!(
                "{} of {} objects exceed density threshold {}: high-density ratio {:.4} is above limit {}",
                failed_count, total, density_threshold, ratio, high_density_object_limit
            ),
        )
    } else {
        (
            VerdictStatus::Success,
            format!(
                "{} of {} objects exceed density threshold {}: high-density ratio {:.4} is within limit {}",
                failed_count, total, density_threshold, ratio, high_density_object_limit
            ),
        )
    };

    RunVerdict {
        status,
        reason,
        flags,
        ratio: Some(ratio),
    }
}
