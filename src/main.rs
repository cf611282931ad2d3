//! Ordering dashboard: upcoming delivery windows and summary stats
//!
//! Usage:
//!   cargo run --release -- --input data/predictions.json [OPTIONS]
//!
//! Options:
//!   --patterns <PATH>         Vendor pattern JSON (optional)
//!   --vendor <NAME>           Only this vendor
//!   --search <TEXT>           Item name/id substring
//!   --low-confidence-only     Only items with pattern confidence < 60%
//!   --today <YYYY-MM-DD>      Override "today" for the this-week count
//!   --format <text|json>      Output format (default: text)
//!   --export-csv <PATH>       Also write the order sheet as CSV

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use ordering_dashboard::{
    dates::today_local,
    export::export_to_path,
    filters::DashboardFilter,
    grouping::{build_delivery_groups, select_strategy, DeliveryGroup, GroupingStrategy},
    loader::{load_patterns, load_predictions},
    render::render_dashboard,
    stats::{compute_ordering_stats_at, OrderingStats},
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ordering_dashboard")]
#[command(about = "Group order predictions into delivery windows and summarize them")]
struct Args {
    /// Predictions file (.json or .csv)
    #[arg(long, default_value = "data/predictions.json")]
    input: PathBuf,

    /// Vendor delivery patterns (JSON)
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Only show this vendor
    #[arg(long)]
    vendor: Option<String>,

    /// Case-insensitive item search
    #[arg(long)]
    search: Option<String>,

    /// Only items whose delivery pattern confidence is below 60%
    #[arg(long, default_value = "false")]
    low_confidence_only: bool,

    /// Date used as "today" (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the grouped order sheet to this CSV path
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Log filter, e.g. "info" or "ordering_dashboard=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct DashboardView<'a> {
    strategy: GroupingStrategy,
    stats: &'a OrderingStats,
    groups: &'a [DeliveryGroup],
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_level.as_str())
        .with_writer(std::io::stderr)
        .init();

    let predictions = load_predictions(&args.input)?;
    let patterns = match &args.patterns {
        Some(path) => load_patterns(path)?,
        None => Vec::new(),
    };

    let filter = DashboardFilter {
        vendor: args.vendor.clone(),
        search: args.search.clone(),
        low_confidence_only: args.low_confidence_only,
    };
    let visible = filter.apply(&predictions);
    if !filter.is_empty() {
        info!("Filter kept {} of {} predictions", visible.len(), predictions.len());
    }

    let today = args.today.unwrap_or_else(today_local);
    let strategy = select_strategy(&visible);
    let groups = build_delivery_groups(&visible);
    let stats = compute_ordering_stats_at(&visible, &patterns, today);
    info!("Built {} delivery groups ({:?})", groups.len(), strategy);

    match args.format {
        OutputFormat::Text => print!("{}", render_dashboard(&stats, &groups)),
        OutputFormat::Json => {
            let view = DashboardView {
                strategy,
                stats: &stats,
                groups: &groups,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    if let Some(path) = &args.export_csv {
        let rows = export_to_path(&groups, path)
            .with_context(|| format!("exporting order sheet to {}", path.display()))?;
        info!("Wrote {} rows to {:?}", rows, path);
    }

    Ok(())
}
