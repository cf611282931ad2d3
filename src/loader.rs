//! Loading prediction and pattern exports from disk.
//!
//! JSON comes straight from the predictions endpoint, either as a bare array or
//! wrapped as `{"predictions": [...]}`. CSV is the flat export of the same
//! shape. Records are never rejected here: anything odd is logged and left to
//! the total grouping/stats functions.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::dates::parse_api_date;
use crate::grouping::DELIVERY_BUCKETS;
use crate::models::{CsvRecord, Prediction, VendorPattern, UNKNOWN_DATE_KEY};

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionPayload {
    Bare(Vec<Prediction>),
    Wrapped { predictions: Vec<Prediction> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatternPayload {
    Bare(Vec<VendorPattern>),
    Wrapped { patterns: Vec<VendorPattern> },
}

/// Problems worth flagging in a prediction list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub out_of_range_index: usize,
    pub unparseable_dates: usize,
    pub confidence_out_of_range: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

pub fn parse_predictions_json(text: &str) -> Result<Vec<Prediction>> {
    let payload: PredictionPayload = serde_json::from_str(text).context("decoding predictions JSON")?;
    Ok(match payload {
        PredictionPayload::Bare(v) | PredictionPayload::Wrapped { predictions: v } => v,
    })
}

pub fn parse_patterns_json(text: &str) -> Result<Vec<VendorPattern>> {
    let payload: PatternPayload = serde_json::from_str(text).context("decoding patterns JSON")?;
    Ok(match payload {
        PatternPayload::Bare(v) | PatternPayload::Wrapped { patterns: v } => v,
    })
}

/// Read CSV rows; malformed rows are skipped and counted
pub fn read_predictions_csv<R: std::io::Read>(reader: R) -> Vec<Prediction> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut predictions = Vec::new();
    let mut error_count = 0;
    for (i, row) in reader.deserialize::<CsvRecord>().enumerate() {
        match row {
            Ok(record) => predictions.push(record.to_prediction()),
            Err(e) => {
                error_count += 1;
                warn!("Skipping CSV row {}: {}", i + 1, e);
            }
        }
    }

    if error_count > 0 {
        warn!("Skipped {} malformed CSV rows", error_count);
    }
    predictions
}

/// Load predictions from a `.csv` or JSON file
pub fn load_predictions(path: &Path) -> Result<Vec<Prediction>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let predictions = if is_csv {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening predictions CSV {}", path.display()))?;
        read_predictions_csv(file)
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading predictions file {}", path.display()))?;
        parse_predictions_json(&text)?
    };

    info!("Loaded {} predictions from {:?}", predictions.len(), path);
    validate_predictions(&predictions);
    Ok(predictions)
}

pub fn load_patterns(path: &Path) -> Result<Vec<VendorPattern>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading patterns file {}", path.display()))?;
    let patterns = parse_patterns_json(&text)?;
    info!("Loaded {} vendor patterns from {:?}", patterns.len(), path);
    Ok(patterns)
}

/// Log values the dashboard will silently absorb (clamped indexes, dates
/// treated as missing, confidences outside 0-1)
pub fn validate_predictions(predictions: &[Prediction]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let max_index = DELIVERY_BUCKETS as i64 - 1;

    for p in predictions {
        if let Some(idx) = p.order_index {
            if !(0..=max_index).contains(&idx) {
                report.out_of_range_index += 1;
                warn!(
                    item = p.display_name(),
                    order_index = idx,
                    "order_index outside 0..={}, clamping",
                    max_index
                );
            }
        }

        let key = p.date_key();
        if key != UNKNOWN_DATE_KEY && parse_api_date(key).is_none() {
            report.unparseable_dates += 1;
            warn!(item = p.display_name(), date = key, "unparseable date, treating as no date");
        }

        if let Some(c) = p.delivery_pattern_confidence {
            if !(0.0..=1.0).contains(&c) {
                report.confidence_out_of_range += 1;
                warn!(item = p.display_name(), confidence = c, "confidence outside 0-1");
            }
        }
    }

    report
}
