//! IPO bid analysis tool.
//!
//! Loads a JSON export of the `bids` sheet, filters it, and prints clearing
//! prices, descriptive statistics, outliers and revenue scenarios.
//!
//! Usage:
//!   cargo run --release --bin ipo-analyze -- bids.json
//!   cargo run --release --bin ipo-analyze -- bids.json --max-amount 500 --supply-change 0.2 --supply-change -0.2
//!   cargo run --release --bin ipo-analyze -- bids.json --config analysis.json --json > report.json

use anyhow::{Context, Result};
use clap::Parser;
use ipo_core::Config;
use ipo_ingestion::load_records_from_path;
use ipo_report::{AnalysisPipeline, TextReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Market-clearing prices and bid statistics for sneaker IPO auctions
#[derive(Parser, Debug)]
#[command(name = "ipo-analyze")]
#[command(about = "Compute per-variant clearing prices and bid statistics from IPO bid records")]
struct Cli {
    /// Path to the bid dataset (JSON array of rows, or {"bids": [...]})
    data: PathBuf,

    /// Optional JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Action to retain (overrides config)
    #[arg(long)]
    action: Option<String>,

    /// Inclusive bid-amount ceiling (overrides config)
    #[arg(long)]
    max_amount: Option<f64>,

    /// Supply change scenario as a fraction; repeatable (overrides config)
    #[arg(long = "supply-change", allow_negative_numbers = true)]
    supply_changes: Vec<f64>,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => Config::default(),
    };
    if let Some(action) = cli.action {
        config.filter.action = action;
    }
    if let Some(max_amount) = cli.max_amount {
        config.filter.max_amount = max_amount;
    }
    if !cli.supply_changes.is_empty() {
        config.projection.supply_changes = cli.supply_changes;
    }

    let pipeline = AnalysisPipeline::new(config).context("Invalid configuration")?;

    let records = load_records_from_path(&cli.data)
        .with_context(|| format!("Failed to load dataset: {:?}", cli.data))?;

    let report = pipeline.run(&records).context("Analysis failed")?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", TextReport(&report));
    }

    Ok(())
}
