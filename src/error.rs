// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for density analysis

use thiserror::Error;

/// Result type for density analysis operations
pub type Result<T> = std::result::Result<T, DensityError>;

/// Errors that can occur while measuring or classifying objects
#[derive(Error, Debug)]
pub enum DensityError {
    #[error("Malformed geometry in object '{object_id}': {reason}")]
    MalformedGeometry { object_id: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DensityError {
    /// Malformed geometry not yet attributed to an object
    pub fn malformed(reason: impl Into<String>) -> Self {
        DensityError::MalformedGeometry {
            object_id: String::new(),
            reason: reason.into(),
        }
    }

    /// Attach an object id to a malformed-geometry error
    pub fn for_object(self, id: &str) -> Self {
        match self {
            DensityError::MalformedGeometry { reason, .. } => DensityError::MalformedGeometry {
                object_id: id.to_string(),
                reason,
            },
            other => other,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, DensityError::MalformedGeometry { .. })
    }
}
