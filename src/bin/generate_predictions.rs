//! Synthetic prediction generator for the ordering dashboard
//!
//! Usage:
//!   cargo run --release --bin generate_predictions -- [OPTIONS]
//!
//! Options:
//!   --vendors <N>            Number of vendors (default: 3)
//!   --items-per-vendor <N>   Items per vendor (default: 4)
//!   --no-order-index         Only set dates, forcing date-based grouping
//!   --start <YYYY-MM-DD>     Reference date (default: today)
//!   --seed <N>               Random seed for reproducibility (optional)
//!   --output <PATH>          Output path; .csv writes CSV, anything else JSON

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use csv::WriterBuilder;
use ordering_dashboard::{
    dates::today_local,
    synthetic::{generate_predictions, SyntheticConfig},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "generate_predictions")]
#[command(about = "Generate synthetic order predictions for the dashboard")]
struct Args {
    #[arg(long, default_value = "3")]
    vendors: usize,

    #[arg(long, default_value = "4")]
    items_per_vendor: usize,

    /// Leave order_index unset
    #[arg(long)]
    no_order_index: bool,

    /// Share of predictions without a confidence (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    missing_confidence_rate: f64,

    #[arg(long)]
    start: Option<NaiveDate>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "data/predictions.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = SyntheticConfig {
        vendors: args.vendors,
        items_per_vendor: args.items_per_vendor,
        with_order_index: !args.no_order_index,
        start: args.start.unwrap_or_else(today_local),
        missing_confidence_rate: args.missing_confidence_rate,
    };
    config.validate()?;
    let predictions = generate_predictions(&config, &mut rng);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let is_csv = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        let mut writer = WriterBuilder::new().has_headers(true).from_path(&args.output)?;
        for p in &predictions {
            writer.serialize(p)?;
        }
        writer.flush()?;
    } else {
        let json = serde_json::to_string_pretty(&predictions)?;
        std::fs::write(&args.output, json)
            .with_context(|| format!("writing {}", args.output.display()))?;
    }

    info!("Wrote {} predictions to {:?}", predictions.len(), args.output);
    Ok(())
}
