// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Density metrics and the per-run density cache

pub mod cache;
pub mod metric;

pub use cache::{CacheStats, DensityCache};
pub use metric::{compute_density, object_density};
