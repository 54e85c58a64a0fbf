//! # forecast-monitor
//!
//! Command-line interface for checking forecasts against their history.

mod loader;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use diagnostic_facade::{
    analysis_summary, detailed_report, issue_breakdown, rank_by_risk, summary_table,
    DiagnosticsConfig, ItemReport,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::loader::{item_ids, item_segments, load_path, LoaderConfig};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "forecast_monitor=info,diagnostic_core=info";

#[derive(Parser)]
#[command(name = "forecast-monitor")]
#[command(about = "Forecast consistency diagnostics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the item ids found in the input
    Items {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Diagnose a single item
    Analyze {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Item id to analyze
        #[arg(long)]
        item: String,

        /// Months compared by the magnitude check (overrides the config)
        #[arg(short, long)]
        window: Option<usize>,

        /// Diagnostics configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rows expected per item; 0 disables the check
        #[arg(long, default_value = "54")]
        expected: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose every item and rank by risk
    Scan {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of items shown in the ranking
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Diagnostics configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rows expected per item; 0 disables the check
        #[arg(long, default_value = "54")]
        expected: usize,

        /// Write all item reports to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>, window: Option<usize>) -> anyhow::Result<DiagnosticsConfig> {
    let mut config = match path {
        Some(path) => DiagnosticsConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DiagnosticsConfig::default(),
    };
    if let Some(months) = window {
        config.window.months = months;
    }
    config.validate()?;
    Ok(config)
}

fn run_items(input: &Path) -> anyhow::Result<()> {
    let records = load_path(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for id in item_ids(&records) {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}

fn run_analyze(
    input: &Path,
    item: &str,
    config: &DiagnosticsConfig,
    loader: &LoaderConfig,
    json: bool,
) -> anyhow::Result<()> {
    let records = load_path(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let (historical, forecast) = item_segments(&records, item, loader)?;
    info!(
        item,
        historical = historical.len(),
        forecast = forecast.len(),
        "analyzing item"
    );

    let result = config.run(&historical, &forecast)?;
    let summary = analysis_summary(item, &result, &historical, &forecast);
    let report = ItemReport::new(item, result);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}\n", summary);
        println!("{}", detailed_report(&report));
    }
    Ok(())
}

fn run_scan(
    input: &Path,
    top: usize,
    config: &DiagnosticsConfig,
    loader: &LoaderConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let records = load_path(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let aggregator = config.build()?;

    let mut reports = Vec::new();
    let mut skipped = 0usize;
    for id in item_ids(&records) {
        let (historical, forecast) = match item_segments(&records, &id, loader) {
            Ok(segments) => segments,
            Err(e) => {
                warn!(item = %id, error = %e, "skipping item");
                skipped += 1;
                continue;
            }
        };
        match aggregator.run(&config.input(&historical, &forecast)) {
            Ok(result) => reports.push(ItemReport::new(id, result)),
            Err(e) => {
                warn!(item = %id, error = %e, "diagnostics failed");
                skipped += 1;
            }
        }
    }
    info!(analyzed = reports.len(), skipped, "scan complete");

    let ranked: Vec<ItemReport> = rank_by_risk(&reports, top).into_iter().cloned().collect();
    println!("Top {} items by risk\n", ranked.len());
    println!("{}\n", summary_table(&ranked));

    println!("Issue breakdown ({} items):", reports.len());
    for (kind, count) in issue_breakdown(&reports) {
        println!("  {:<20} {}", kind.title(), count);
    }

    if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &reports)?;
        writer.flush()?;
        println!("\nReports written to {}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Items { input } => run_items(&input),

        Commands::Analyze {
            input,
            item,
            window,
            config,
            expected,
            json,
        } => {
            let config = load_config(config.as_deref(), window)?;
            let loader = LoaderConfig {
                expected_observations: expected,
            };
            run_analyze(&input, &item, &config, &loader, json)
        }

        Commands::Scan {
            input,
            top,
            config,
            expected,
            output,
        } => {
            let config = load_config(config.as_deref(), None)?;
            let loader = LoaderConfig {
                expected_observations: expected,
            };
            run_scan(&input, top, &config, &loader, output.as_deref())
        }
    }
}
