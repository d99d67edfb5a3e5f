// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terminal, JSON and Markdown output for analysis reports

use crate::analysis::{AnalysisReport, VerdictStatus};
use anyhow::Result;
use colored::*;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Densest objects listed in summaries
const TOP_OBJECTS: usize = 10;

/// Report writer
pub struct Reporter;

impl Reporter {
    /// Write JSON report
    pub fn write_json(report: &AnalysisReport, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write Markdown report
    pub fn write_markdown(report: &AnalysisReport, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, Self::render_markdown(report))?;
        Ok(())
    }

    pub fn render_markdown(report: &AnalysisReport) -> String {
        let mut md = String::new();

        md.push_str("# Density Analysis Report\n\n");
        md.push_str(&format!("**Generated:** {}\n\n", report.timestamp));
        if let Some(ref snapshot) = report.snapshot {
            md.push_str(&format!("**Snapshot:** `{}`\n\n", snapshot));
        }
        md.push_str("---\n\n");

        md.push_str("## Verdict\n\n");
        md.push_str(&format!(
            "- **Status:** {}\n",
            report.verdict.status.as_str().to_uppercase()
        ));
        md.push_str(&format!("- **Reason:** {}\n", report.verdict.reason));
        md.push_str(&format!("- **Objects:** {}\n", report.object_count));
        md.push_str(&format!("- **Density Threshold:** {}\n", report.density_threshold));
        md.push_str(&format!(
            "- **High-Density Object Limit:** {}\n",
            report.high_density_object_limit
        ));
        if let Some(ratio) = report.verdict.ratio {
            md.push_str(&format!("- **High-Density Ratio:** {:.4}\n", ratio));
        }
        md.push_str(&format!(
            "- **Duration:** {:.3}s\n\n",
            report.duration.as_secs_f64()
        ));

        if !report.verdict.flags.is_empty() {
            md.push_str("## Flagged Objects\n\n");
            md.push_str("| Object | Density | Message |\n");
            md.push_str("|---|---|---|\n");
            for flag in &report.verdict.flags {
                md.push_str(&format!(
                    "| `{}` | {:.4} | {} |\n",
                    flag.object_id, flag.density, flag.message
                ));
            }
            md.push('\n');
        }

        if !report.malformed.is_empty() {
            md.push_str("## Malformed Geometry\n\n");
            for id in &report.malformed {
                md.push_str(&format!("- `{}`\n", id));
            }
            md.push('\n');
        }

        md
    }

    /// Print summary to terminal
    pub fn print_summary(report: &AnalysisReport) {
        Self::print_summary_with_verbose(report, false)
    }

    /// Print summary, listing every density when verbose
    pub fn print_summary_with_verbose(report: &AnalysisReport, verbose: bool) {
        println!("\n{}", "═".repeat(80).white());
        println!("{}", "Density Analysis".bold());
        println!("{}", "═".repeat(80).white());

        let status = match report.verdict.status {
            VerdictStatus::Success => "✅ SUCCESS".green().bold(),
            VerdictStatus::Failure => "❌ FAILURE".red().bold(),
        };
        println!("  {} {}", "Verdict:".white(), status);
        println!("  {} {}", "Reason:".white(), report.verdict.reason);
        println!("  {} {}", "Objects:".white(), report.object_count.to_string().cyan());
        println!(
            "  {} {}",
            "Flagged:".white(),
            if report.verdict.flags.is_empty() {
                "0".green()
            } else {
                report.verdict.flags.len().to_string().red()
            }
        );
        if !report.malformed.is_empty() {
            println!(
                "  {} {}",
                "Malformed:".white(),
                report.malformed.len().to_string().yellow()
            );
        }
        println!(
            "  {} {}",
            "Time:".white(),
            Self::format_duration(report.duration).yellow()
        );

        if !report.verdict.flags.is_empty() {
            println!("\n{}", "Flagged Objects".red().bold());
            println!("{}", "─".repeat(80).white());
            let limit = if verbose { usize::MAX } else { TOP_OBJECTS };
            for flag in report.verdict.flags.iter().take(limit) {
                println!("  {} {} {}", "✗".red(), flag.object_id.cyan(), flag.message.white());
            }
            if report.verdict.flags.len() > limit {
                println!(
                    "  {}",
                    format!("... and {} more", report.verdict.flags.len() - limit).bright_black()
                );
            }
        }

        if verbose {
            println!(
                "  {} {} computed, {} reused ({:.1}% hit rate)",
                "Cache:".white(),
                report.cache.computations,
                report.cache.hits,
                report.cache.hit_rate()
            );
        }

        if verbose && !report.densities.is_empty() {
            println!("\n{}", "Densities".bold());
            println!("{}", "─".repeat(80).white());
            for (id, density) in &report.densities {
                println!("  {:<40} {:>12.4}", id, density);
            }
        }

        println!("{}", "═".repeat(80).white());
    }

    /// One line per snapshot in a batch run
    pub fn report_batch_entry(name: &str, report: &AnalysisReport) {
        let icon = if report.is_success() { "✓".green() } else { "✗".red() };
        println!("  {} {} {}", icon, name.cyan(), report.verdict.reason.bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
