// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis configuration

use crate::error::{DensityError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up by [`AnalysisConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "density.toml";

/// What to do when an object's geometry cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Record density 0 for the object and keep going
    #[default]
    Skip,
    /// Stop the run with a failure verdict
    Abort,
}

impl MalformedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedPolicy::Skip => "skip",
            MalformedPolicy::Abort => "abort",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(MalformedPolicy::Skip),
            "abort" => Some(MalformedPolicy::Abort),
            _ => None,
        }
    }
}

/// Thresholds and policies for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Objects with density strictly above this are flagged
    pub density_threshold: f64,
    /// Largest tolerated fraction of flagged objects, in [0, 1]
    pub high_density_object_limit: f64,
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
    /// Attach density colors to the analyzed objects
    #[serde(default)]
    pub colorize: bool,
}

impl AnalysisConfig {
    pub fn new(density_threshold: f64, high_density_object_limit: f64) -> Self {
        Self {
            density_threshold,
            high_density_object_limit,
            on_malformed: MalformedPolicy::default(),
            colorize: false,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AnalysisConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` (or `density.toml` if present) and apply environment overrides.
    ///
    /// Without a file both thresholds must come from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(path, None, None)
    }

    /// Layer file, environment and explicit threshold overrides, later wins.
    ///
    /// The thresholds are only required when no layer provides them.
    pub fn load_with_overrides(
        path: Option<&Path>,
        threshold: Option<f64>,
        limit: Option<f64>,
    ) -> Result<Self> {
        let from_file = match path {
            Some(path) => Some(Self::from_file(path)?),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Some(Self::from_file(DEFAULT_CONFIG_FILE)?)
            }
            None => None,
        };

        let threshold = threshold.or(env_f64("DENSITY_THRESHOLD")?);
        let limit = limit.or(env_f64("HIGH_DENSITY_OBJECT_LIMIT")?);

        let mut config = match (from_file, threshold, limit) {
            (Some(mut config), threshold, limit) => {
                if let Some(threshold) = threshold {
                    config.density_threshold = threshold;
                }
                if let Some(limit) = limit {
                    config.high_density_object_limit = limit;
                }
                config
            }
            (None, Some(threshold), Some(limit)) => Self::new(threshold, limit),
            (None, _, _) => {
                return Err(DensityError::InvalidConfig(
                    "density_threshold and high_density_object_limit are required".to_string(),
                ));
            }
        };

        if let Ok(policy) = std::env::var("DENSITY_ON_MALFORMED") {
            config.on_malformed = MalformedPolicy::from_str(&policy).ok_or_else(|| {
                DensityError::InvalidConfig(format!("unknown malformed policy: {}", policy))
            })?;
        }

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DensityError::InvalidConfig(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Reject thresholds the classifier cannot use
    pub fn validate(&self) -> Result<()> {
        if !self.density_threshold.is_finite() || self.density_threshold <= 0.0 {
            return Err(DensityError::InvalidConfig(format!(
                "density_threshold must be a positive number, got {}",
                self.density_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.high_density_object_limit) {
            return Err(DensityError::InvalidConfig(format!(
                "high_density_object_limit must be within [0, 1], got {}",
                self.high_density_object_limit
            )));
        }

        Ok(())
    }
}

fn env_f64(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DensityError::InvalidConfig(format!("{} is not a number: {}", name, value))),
        Err(_) => Ok(None),
    }
}
