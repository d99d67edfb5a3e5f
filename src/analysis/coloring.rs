// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Density coloring of analyzed objects

use super::classifier::exceeds;
use crate::density::DensityCache;
use crate::geometry::{GeometryObject, RenderMaterial};
use crate::utils::math::{clamp, lerp_rgb};

const LOW_DENSITY: [f64; 3] = [0.0, 0.75, 0.25];
/// Top of the gradient for objects that do not exceed the threshold
const NEAR_LIMIT: [f64; 3] = [1.0, 0.5, 0.0];
const HIGH_DENSITY: [f64; 3] = [1.0, 0.0, 0.0];

/// Color for a density relative to the threshold.
///
/// Non-exceeding objects run from green to orange; only exceeding objects are red.
pub fn density_color(density: f64, threshold: f64) -> [f64; 3] {
    if exceeds(density, threshold) {
        return HIGH_DENSITY;
    }
    let t = if threshold > 0.0 {
        clamp(density / threshold, 0.0, 1.0)
    } else {
        0.0
    };
    lerp_rgb(LOW_DENSITY, NEAR_LIMIT, t)
}

/// Attach a density material to every object; geometry is left untouched
pub fn colorize(objects: &mut [GeometryObject], densities: &DensityCache, threshold: f64) {
    for object in objects.iter_mut() {
        let density = densities.get(&object.id).unwrap_or(0.0);
        let name = if exceeds(density, threshold) {
            "density-exceeded"
        } else {
            "density-ok"
        };
        object.render_material = Some(RenderMaterial {
            name: name.to_string(),
            diffuse: density_color(density, threshold),
            opacity: 1.0,
        });
    }
}
