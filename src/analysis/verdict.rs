// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run verdict and per-object flags

use serde::{Deserialize, Serialize};

/// Reason reported when the run has nothing to classify
pub const NO_ELIGIBLE_OBJECTS: &str = "no eligible objects found";

/// Outcome of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Success,
    Failure,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Success => "success",
            VerdictStatus::Failure => "failure",
        }
    }
}

/// Marker for an object whose density is above the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceedFlag {
    pub object_id: String,
    pub density: f64,
    pub message: String,
}

impl ExceedFlag {
    pub fn new(object_id: impl Into<String>, density: f64, threshold: f64) -> Self {
        Self {
            object_id: object_id.into(),
            density,
            message: format!("Density {:.4} exceeds threshold {}", density, threshold),
        }
    }
}

/// Final verdict of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunVerdict {
    pub status: VerdictStatus,
    pub reason: String,
    /// Flagged objects in classification order
    pub flags: Vec<ExceedFlag>,
    /// Fraction of flagged objects, absent when no ratio was computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl RunVerdict {
    /// Failure without any classification
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Failure,
            reason: reason.into(),
            flags: Vec::new(),
            ratio: None,
        }
    }

    pub fn no_eligible_objects() -> Self {
        Self::failure(NO_ELIGIBLE_OBJECTS)
    }

    pub fn is_success(&self) -> bool {
        self.status == VerdictStatus::Success
    }

    /// Ids of the objects that exceeded the density threshold
    pub fn exceeding_ids(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|flag| flag.object_id.as_str())
    }
}
