// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Density Checker CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use density_checker::io::{discover_snapshots, read_snapshot, write_snapshot};
use density_checker::report::Reporter;
use density_checker::{AnalysisConfig, AnalysisReport, Analyzer, MalformedPolicy};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "density-check")]
#[command(about = "Geometric density analysis for 3D object snapshots", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis config file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Per-object density threshold
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Largest tolerated fraction of high-density objects (0..=1)
    #[arg(long, global = true)]
    limit: Option<f64>,

    /// Malformed geometry policy (skip, abort)
    #[arg(long, global = true)]
    on_malformed: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single snapshot
    Analyze {
        /// Input snapshot (JSON)
        snapshot: PathBuf,

        /// Report file (.json or .md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the snapshot back with density colors applied
        #[arg(long, value_name = "FILE")]
        colored_snapshot: Option<PathBuf>,
    },

    /// Analyze every snapshot under the given paths
    Batch {
        /// Snapshot files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory for per-snapshot JSON reports
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Write a config template
    InitConfig {
        /// Destination file
        #[arg(default_value = density_checker::config::DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Analyze {
            snapshot,
            output,
            colored_snapshot,
        } => {
            let config = resolve_config(&cli)?;
            let report = analyze_command(
                snapshot,
                output.as_deref(),
                colored_snapshot.as_deref(),
                config,
                cli.verbose,
            )?;
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Batch { paths, out } => {
            let config = resolve_config(&cli)?;
            if !batch_command(paths, out.as_deref(), config)? {
                std::process::exit(1);
            }
        }
        Commands::InitConfig { path } => {
            let config = AnalysisConfig::new(
                cli.threshold.unwrap_or(1.0),
                cli.limit.unwrap_or(0.1),
            );
            config.validate()?;
            config
                .save(path)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
            println!("{} Wrote {}", "Success:".green(), path.display());
        }
        Commands::Version => {
            println!("Density Checker v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Flags win over environment, environment over the config file
fn resolve_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config =
        AnalysisConfig::load_with_overrides(cli.config.as_deref(), cli.threshold, cli.limit)
            .context("Failed to load analysis configuration")?;

    if let Some(ref policy) = cli.on_malformed {
        config.on_malformed = MalformedPolicy::from_str(policy)
            .ok_or_else(|| anyhow::anyhow!("Unknown malformed policy: {}. Use skip or abort", policy))?;
    }

    config.validate()?;
    Ok(config)
}

fn analyze_command(
    path: &Path,
    output: Option<&Path>,
    colored_snapshot: Option<&Path>,
    mut config: AnalysisConfig,
    verbose: bool,
) -> Result<AnalysisReport> {
    if colored_snapshot.is_some() {
        config.colorize = true;
    }

    if verbose {
        println!("{} {}", "Analyzing:".bold(), path.display());
        println!(
            "  threshold={} limit={} on_malformed={}",
            config.density_threshold,
            config.high_density_object_limit,
            config.on_malformed.as_str()
        );
    }

    let snapshot = read_snapshot(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let fingerprint = snapshot.fingerprint.clone();
    let mut objects = snapshot.into_displayable();

    let report = Analyzer::new(config).run(&mut objects)?.with_snapshot(fingerprint);

    Reporter::print_summary_with_verbose(&report, verbose);

    if let Some(output) = output {
        write_report(&report, output)?;
        println!("{} Report written to {}", "Success:".green(), output.display());
    }

    if let Some(colored) = colored_snapshot {
        write_snapshot(&objects, colored)
            .with_context(|| format!("Failed to write snapshot: {}", colored.display()))?;
        println!("{} Colored snapshot written to {}", "Success:".green(), colored.display());
    }

    Ok(report)
}

/// Returns true when every snapshot passed
fn batch_command(paths: &[PathBuf], out: Option<&Path>, config: AnalysisConfig) -> Result<bool> {
    let snapshots = discover_snapshots(paths);
    if snapshots.is_empty() {
        Reporter::report_error("No snapshots found");
        return Ok(false);
    }

    if let Some(out) = out {
        std::fs::create_dir_all(out)?;
    }

    println!("{} {} snapshots", "Analyzing".bold(), snapshots.len());

    let analyzer = Analyzer::new(config);
    let mut passed = 0;

    for path in &snapshots {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let snapshot = match read_snapshot(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                Reporter::report_error(&format!("{}: {}", name, e));
                continue;
            }
        };

        let fingerprint = snapshot.fingerprint.clone();
        let mut objects = snapshot.into_displayable();
        let report = analyzer.run(&mut objects)?.with_snapshot(fingerprint);

        Reporter::report_batch_entry(&name, &report);
        if report.is_success() {
            passed += 1;
        }

        if let Some(out) = out {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            Reporter::write_json(&report, out.join(format!("{}_report.json", stem)))?;
        }
    }

    println!(
        "\n{} {}/{} snapshots passed",
        "Summary:".bold(),
        passed,
        snapshots.len()
    );

    Ok(passed == snapshots.len())
}

fn write_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("md") | Some("markdown") => Reporter::write_markdown(report, path),
        _ => Reporter::write_json(report, path),
    }
}
