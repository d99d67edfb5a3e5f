// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Threshold classification and the analysis pipeline

pub mod analyzer;
pub mod classifier;
pub mod coloring;
pub mod verdict;

pub use analyzer::{AnalysisReport, Analyzer};
pub use classifier::{classify, exceeds};
pub use coloring::{colorize, density_color};
pub use verdict::{ExceedFlag, RunVerdict, VerdictStatus, NO_ELIGIBLE_OBJECTS};
