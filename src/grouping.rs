//! Delivery-window grouping.
//!
//! Turns a flat list of predictions into the ordered buckets shown on the
//! ordering dashboard. When the forecasting service assigned `order_index`
//! values, predictions go into four fixed buckets (the next four delivery
//! cycles). Otherwise they are grouped by their literal delivery date.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::dates::{format_day_label, parse_api_date};
use crate::format::lead_time_hint;
use crate::models::Prediction;

/// Number of upcoming delivery cycles shown when bucketing by `order_index`
pub const DELIVERY_BUCKETS: usize = 4;

/// How a prediction list is partitioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupingStrategy {
    ByOrderIndex,
    ByDate,
}

/// One upcoming delivery window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryGroup {
    pub index: usize,
    pub label: String,
    pub date: Option<NaiveDate>,
    pub predictions: Vec<Prediction>,
    pub lead_time_hint: Option<String>,
}

impl DeliveryGroup {
    fn empty(index: usize) -> Self {
        Self {
            index,
            label: String::new(),
            date: None,
            predictions: Vec::new(),
            lead_time_hint: None,
        }
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn total_quantity(&self) -> f64 {
        self.predictions.iter().map(Prediction::quantity).sum()
    }

    /// Distinct named vendors in this window
    pub fn vendor_count(&self) -> usize {
        let mut vendors: Vec<&str> = self
            .predictions
            .iter()
            .filter_map(|p| p.vendor_name.as_deref())
            .collect();
        vendors.sort_unstable();
        vendors.dedup();
        vendors.len()
    }
}

/// Bucket by `order_index` if any prediction carries one
pub fn select_strategy(predictions: &[Prediction]) -> GroupingStrategy {
    if predictions.iter().any(|p| p.order_index.is_some()) {
        GroupingStrategy::ByOrderIndex
    } else {
        GroupingStrategy::ByDate
    }
}

/// Clamp an `order_index` into the bucket range; missing means bucket 0
pub fn bucket_for(order_index: Option<i64>) -> usize {
    order_index.unwrap_or(0).clamp(0, DELIVERY_BUCKETS as i64 - 1) as usize
}

/// Partition predictions into ordered delivery windows.
///
/// Pure and total: identical input yields identical output, and empty input
/// yields no groups.
pub fn build_delivery_groups(predictions: &[Prediction]) -> Vec<DeliveryGroup> {
    let mut groups = match select_strategy(predictions) {
        GroupingStrategy::ByOrderIndex => group_by_order_index(predictions),
        GroupingStrategy::ByDate => group_by_date(predictions),
    };

    for group in &mut groups {
        sort_members(&mut group.predictions);
    }
    groups
}

fn group_by_order_index(predictions: &[Prediction]) -> Vec<DeliveryGroup> {
    let mut groups: Vec<DeliveryGroup> = (0..DELIVERY_BUCKETS).map(DeliveryGroup::empty).collect();
    let mut lead_times: [Option<i64>; DELIVERY_BUCKETS] = [None; DELIVERY_BUCKETS];

    for p in predictions {
        let bucket = bucket_for(p.order_index);
        let group = &mut groups[bucket];

        if let Some(date) = p.resolved_date() {
            if group.date.map_or(true, |earliest| date < earliest) {
                group.date = Some(date);
            }
        }
        if lead_times[bucket].is_none() {
            lead_times[bucket] = p.lead_time_days;
        }
        group.predictions.push(p.clone());
    }

    for (group, lead) in groups.iter_mut().zip(lead_times) {
        group.label = match group.date {
            Some(date) => format_day_label(date),
            None => format!("Delivery #{}", group.index + 1),
        };
        group.lead_time_hint = lead.map(lead_time_hint);
    }
    groups
}

fn group_by_date(predictions: &[Prediction]) -> Vec<DeliveryGroup> {
    let mut groups: Vec<DeliveryGroup> = Vec::new();
    let mut lead_times: Vec<Option<i64>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for p in predictions {
        let key = p.date_key();
        let pos = *positions.entry(key).or_insert_with(|| {
            let mut group = DeliveryGroup::empty(groups.len());
            group.date = parse_api_date(key);
            groups.push(group);
            lead_times.push(None);
            groups.len() - 1
        });

        if lead_times[pos].is_none() {
            lead_times[pos] = p.lead_time_days;
        }
        groups[pos].predictions.push(p.clone());
    }

    for (group, lead) in groups.iter_mut().zip(lead_times) {
        group.lead_time_hint = lead.map(lead_time_hint);
    }

    // Stable: equal dates keep first-seen order, undated groups go last
    groups.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (i, group) in groups.iter_mut().enumerate() {
        group.index = i;
        group.label = match group.date {
            Some(date) => format_day_label(date),
            None => "Unknown date".to_string(),
        };
    }
    groups
}

/// Case-insensitive first, raw string as tie-break
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Vendor name, then item display name
fn sort_members(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| {
        collate(a.vendor_key(), b.vendor_key())
            .then_with(|| collate(a.display_name(), b.display_name()))
    });
}
