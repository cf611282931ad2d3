//! Summary metrics for the ordering dashboard header cards

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::dates::{is_within_week, today_local};
use crate::models::{Prediction, VendorPattern};

/// Pattern confidence strictly below this counts as low confidence
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// `by_vendor` key for predictions without a vendor name
pub const UNKNOWN_VENDOR: &str = "Unknown vendor";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderingStats {
    pub total_items: usize,
    pub total_quantity: f64,
    pub unique_vendors: usize,
    pub deliveries_this_week: usize,
    pub low_confidence_items: usize,
    pub avg_confidence: f64,
    pub earliest_delivery: Option<NaiveDate>,
    pub by_vendor: BTreeMap<String, Vec<Prediction>>,
}

pub fn is_low_confidence(p: &Prediction) -> bool {
    p.delivery_pattern_confidence
        .is_some_and(|c| c < LOW_CONFIDENCE_THRESHOLD)
}

/// Stats relative to the local calendar date
pub fn compute_ordering_stats(predictions: &[Prediction], patterns: &[VendorPattern]) -> OrderingStats {
    compute_ordering_stats_at(predictions, patterns, today_local())
}

/// Stats with an explicit "today" for the this-week window.
///
/// `patterns` is accepted for interface compatibility with the dashboard but
/// does not enter the arithmetic.
pub fn compute_ordering_stats_at(
    predictions: &[Prediction],
    _patterns: &[VendorPattern],
    today: NaiveDate,
) -> OrderingStats {
    let mut vendors: BTreeSet<&str> = BTreeSet::new();
    let mut by_vendor: BTreeMap<String, Vec<Prediction>> = BTreeMap::new();
    let mut total_quantity = 0.0;
    let mut confidence_sum = 0.0;
    let mut confidence_count = 0usize;
    let mut low_confidence_items = 0;
    let mut earliest_delivery: Option<NaiveDate> = None;
    let mut deliveries_this_week = 0;

    for p in predictions {
        let vendor_key = match p.vendor_name.as_deref() {
            Some(name) if !name.is_empty() => {
                vendors.insert(name);
                name
            }
            _ => UNKNOWN_VENDOR,
        };
        by_vendor
            .entry(vendor_key.to_string())
            .or_default()
            .push(p.clone());

        total_quantity += p.quantity();

        if let Some(confidence) = p.delivery_pattern_confidence {
            confidence_sum += confidence;
            confidence_count += 1;
            if confidence < LOW_CONFIDENCE_THRESHOLD {
                low_confidence_items += 1;
            }
        }

        if let Some(date) = p.resolved_date() {
            if earliest_delivery.map_or(true, |earliest| date < earliest) {
                earliest_delivery = Some(date);
            }
            if is_within_week(date, today) {
                deliveries_this_week += 1;
            }
        }
    }

    let avg_confidence = if confidence_count > 0 {
        confidence_sum / confidence_count as f64
    } else {
        0.0
    };

    OrderingStats {
        total_items: predictions.len(),
        total_quantity,
        unique_vendors: vendors.len(),
        deliveries_this_week,
        low_confidence_items,
        avg_confidence,
        earliest_delivery,
        by_vendor,
    }
}
