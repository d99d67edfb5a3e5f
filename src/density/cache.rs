// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-run memo table of object densities

use super::metric::object_density;
use crate::error::Result;
use crate::geometry::GeometryObject;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compute-once density table keyed by object id.
///
/// Lives for exactly one analysis run. Entries are written once and never
/// replaced; failed computations are not stored.
#[derive(Debug, Default)]
pub struct DensityCache {
    entries: AHashMap<String, f64>,
    hits: usize,
    computations: usize,
}

impl DensityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized mean density of `object` under `id`
    pub fn get_or_compute(&mut self, id: &str, object: &GeometryObject) -> Result<f64> {
        self.get_or_compute_with(id, || object_density(object))
    }

    /// Memoized result of `compute` under `id`; `compute` runs at most once per id
    pub fn get_or_compute_with<F>(&mut self, id: &str, compute: F) -> Result<f64>
    where
        F: FnOnce() -> Result<f64>,
    {
        if let Some(&density) = self.entries.get(id) {
            self.hits += 1;
            return Ok(density);
        }

        self.computations += 1;
        let density = compute()?;
        self.entries.insert(id.to_string(), density);
        Ok(density)
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all densities ordered by id
    pub fn densities(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|(id, density)| (id.clone(), *density))
            .collect()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            computations: self.computations,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub computations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f32 {
        let lookups = self.hits + self.computations;
        if lookups == 0 {
            0.0
        } else {
            (self.hits as f32 / lookups as f32) * 100.0
        }
    }
}
