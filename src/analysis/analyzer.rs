// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis run: measure, memoize, classify

use super::classifier::classify;
use super::coloring::colorize;
use super::verdict::RunVerdict;
use crate::config::{AnalysisConfig, MalformedPolicy};
use crate::density::{object_density, CacheStats, DensityCache};
use crate::error::Result;
use crate::geometry::GeometryObject;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

fn serialize_duration<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub timestamp: String,
    /// Fingerprint of the input snapshot, when the host supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
    pub object_count: usize,
    pub density_threshold: f64,
    pub high_density_object_limit: f64,
    /// Density per object id
    pub densities: BTreeMap<String, f64>,
    /// Objects whose geometry could not be decoded
    pub malformed: Vec<String>,
    pub verdict: RunVerdict,
    pub cache: CacheStats,
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub duration: Duration,
}

impl AnalysisReport {
    fn new(config: &AnalysisConfig, object_count: usize) -> Self {
        Self {
            timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            snapshot: None,
            object_count,
            density_threshold: config.density_threshold,
            high_density_object_limit: config.high_density_object_limit,
            densities: BTreeMap::new(),
            malformed: Vec::new(),
            verdict: RunVerdict::no_eligible_objects(),
            cache: DensityCache::new().stats(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_snapshot(mut self, fingerprint: impl Into<String>) -> Self {
        self.snapshot = Some(fingerprint.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.verdict.is_success()
    }
}

/// Runs the density pipeline for one object snapshot at a time
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one snapshot.
    ///
    /// Only an invalid configuration is returned as an error; every other
    /// outcome, including an aborted run, is expressed in the verdict.
    /// When coloring is enabled the objects receive render materials.
    pub fn run(&self, objects: &mut [GeometryObject]) -> Result<AnalysisReport> {
        self.config.validate()?;

        let start = Instant::now();
        let mut report = AnalysisReport::new(&self.config, objects.len());

        if objects.is_empty() {
            tracing::info!("No eligible objects, run fails");
            report.duration = start.elapsed();
            return Ok(report);
        }

        let mut cache = DensityCache::new();
        let mut malformed = Vec::new();

        for object in objects.iter() {
            let measured = cache.get_or_compute_with(&object.id, || match object_density(object) {
                Err(err) if err.is_malformed() && self.config.on_malformed == MalformedPolicy::Skip => {
                    tracing::warn!(object = %object.id, error = %err, "Skipping malformed geometry");
                    malformed.push(object.id.clone());
                    Ok(0.0)
                }
                other => other,
            });

            match measured {
                Ok(density) => {
                    tracing::debug!(object = %object.id, density, "Measured object density");
                }
                Err(err) if err.is_malformed() => {
                    tracing::warn!(object = %object.id, error = %err, "Aborting run on malformed geometry");
                    malformed.push(object.id.clone());
                    report.verdict = RunVerdict::failure(format!("analysis aborted: {}", err));
                    report.densities = cache.densities();
                    report.malformed = malformed;
                    report.cache = cache.stats();
                    report.duration = start.elapsed();
                    return Ok(report);
                }
                Err(err) => return Err(err),
            }
        }

        let verdict = classify(
            objects,
            &cache,
            self.config.density_threshold,
            self.config.high_density_object_limit,
        );

        if self.config.colorize {
            colorize(objects, &cache, self.config.density_threshold);
        }

        tracing::info!(
            status = verdict.status.as_str(),
            flagged = verdict.flags.len(),
            objects = objects.len(),
            "{}",
            verdict.reason
        );

        report.densities = cache.densities();
        report.malformed = malformed;
        report.verdict = verdict;
        report.cache = cache.stats();
        report.duration = start.elapsed();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::verdict::{VerdictStatus, NO_ELIGIBLE_OBJECTS};
    use crate::geometry::{Geometry, PolylineData};

    fn line(id: &str, length: f64) -> GeometryObject {
        GeometryObject::new(id, Geometry::Polyline(PolylineData::new(vec![0.0; 12], length)))
    }

    fn ragged(id: &str) -> GeometryObject {
        GeometryObject::new(id, Geometry::Polyline(PolylineData::new(vec![0.0; 5], 1.0)))
    }

    #[test]
    fn test_invalid_config_aborts_before_objects() {
        let analyzer = Analyzer::new(AnalysisConfig::new(-1.0, 0.5));
        let mut objects = vec![line("a", 1.0)];
        assert!(analyzer.run(&mut objects).is_err());
    }

    #[test]
    fn test_empty_snapshot_fails() {
        let analyzer = Analyzer::new(AnalysisConfig::new(1.0, 0.5));
        let report = analyzer.run(&mut []).unwrap();

        assert_eq!(report.verdict.status, VerdictStatus::Failure);
        assert_eq!(report.verdict.reason, NO_ELIGIBLE_OBJECTS);
        assert!(report.densities.is_empty());
    }

    #[test]
    fn test_skip_policy_degrades_to_zero() {
        let analyzer = Analyzer::new(AnalysisConfig::new(2.0, 0.5));
        let mut objects = vec![line("dense", 1.0), ragged("bad"), line("sparse", 3.0)];

        let report = analyzer.run(&mut objects).unwrap();

        assert_eq!(report.densities["dense"], 3.0);
        assert_eq!(report.densities["bad"], 0.0);
        assert_eq!(report.densities["sparse"], 1.0);
        assert_eq!(report.malformed, vec!["bad".to_string()]);
        assert_eq!(report.cache.computations, 3);
        assert!(report.is_success());
    }

    #[test]
    fn test_abort_policy_fails_run() {
        let config = AnalysisConfig::new(2.0, 0.5).with_policy(MalformedPolicy::Abort);
        let analyzer = Analyzer::new(config);
        let mut objects = vec![line("dense", 1.0), ragged("bad"), line("sparse", 3.0)];

        let report = analyzer.run(&mut objects).unwrap();

        assert_eq!(report.verdict.status, VerdictStatus::Failure);
        assert!(report.verdict.reason.contains("bad"));
        assert!(!report.densities.contains_key("sparse"));
    }

    #[test]
    fn test_colorize_is_opt_in() {
        let mut config = AnalysisConfig::new(2.0, 1.0);
        let mut objects = vec![line("a", 1.0)];
        Analyzer::new(config.clone()).run(&mut objects).unwrap();
        assert!(objects[0].render_material.is_none());

        config.colorize = true;
        Analyzer::new(config).run(&mut objects).unwrap();
        assert!(objects[0].render_material.is_some());
    }

    #[test]
    fn test_report_rejects_negative_duration() {
        let analyzer = Analyzer::new(AnalysisConfig::new(2.0, 0.5));
        let report = analyzer.run(&mut [line("a", 1.0)]).unwrap();

        let mut json = serde_json::to_value(&report).unwrap();
        assert!(serde_json::from_value::<AnalysisReport>(json.clone()).is_ok());

        json["duration"] = serde_json::json!(-1.0);
        assert!(serde_json::from_value::<AnalysisReport>(json).is_err());
    }
}
