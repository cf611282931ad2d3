//! Synthetic prediction generator for demos and dashboard load testing.
//!
//! Each vendor gets a delivery cadence and a lead time; each of its items gets
//! one prediction per upcoming delivery cycle with controlled random variation.

use anyhow::{ensure, Result};
use chrono::{Duration, NaiveDate};
use rand::prelude::*;

use crate::dates::format_iso;
use crate::grouping::DELIVERY_BUCKETS;
use crate::models::Prediction;

const VENDORS: [&str; 6] = [
    "Sysco",
    "US Foods",
    "Restaurant Depot",
    "Performance Foodservice",
    "Gordon Food Service",
    "Local Farms Co-op",
];

const ITEMS: [(&str, &str); 12] = [
    ("Chicken Thighs", "lb"),
    ("Ground Beef 80/20", "lb"),
    ("Roma Tomatoes", "case"),
    ("Yellow Onions", "bag"),
    ("Canola Oil", "jug"),
    ("All-Purpose Flour", "bag"),
    ("Whole Milk", "gal"),
    ("Large Eggs", "case"),
    ("Romaine Hearts", "case"),
    ("Cheddar Cheese", "lb"),
    ("Burger Buns", "dozen"),
    ("Lemons", "case"),
];

#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub vendors: usize,
    pub items_per_vendor: usize,
    /// Assign `order_index` (0-3); otherwise only dates are set
    pub with_order_index: bool,
    pub start: NaiveDate,
    /// Share of predictions with no pattern confidence
    pub missing_confidence_rate: f64,
}

impl SyntheticConfig {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            vendors: 3,
            items_per_vendor: 4,
            with_order_index: true,
            start,
            missing_confidence_rate: 0.1,
        }
    }

    /// Reject settings the generator cannot sample from
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.missing_confidence_rate.is_finite()
                && (0.0..=1.0).contains(&self.missing_confidence_rate),
            "missing confidence rate must be between 0.0 and 1.0, got {}",
            self.missing_confidence_rate
        );
        Ok(())
    }
}

/// Turn an item name into the API's normalized id form
pub fn normalize_item_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn generate_predictions(config: &SyntheticConfig, rng: &mut impl Rng) -> Vec<Prediction> {
    let mut predictions = Vec::new();
    let missing_rate = if config.missing_confidence_rate.is_finite() {
        config.missing_confidence_rate.clamp(0.0, 1.0)
    } else {
        0.0
    };

    for vendor in VENDORS.iter().cycle().take(config.vendors) {
        let cadence_days: i64 = *[3i64, 4, 7].choose(rng).unwrap_or(&7);
        let lead_time: i64 = rng.gen_range(1..=3);
        let first_delivery = config.start + Duration::days(rng.gen_range(1..=cadence_days));
        let vendor_confidence: f64 = rng.gen_range(0.35..0.98);

        let items: Vec<&(&str, &str)> = ITEMS.choose_multiple(rng, config.items_per_vendor).collect();
        for &&(item, unit) in &items {
            let base_qty: f64 = rng.gen_range(2.0..40.0);

            for cycle in 0..DELIVERY_BUCKETS {
                let date = first_delivery + Duration::days(cadence_days * cycle as i64);
                let qty = (base_qty * rng.gen_range(0.8..1.2) * 10.0).round() / 10.0;
                let spread = (qty * rng.gen_range(0.05..0.25) * 10.0).round() / 10.0;
                let confidence = if rng.gen_bool(missing_rate) {
                    None
                } else {
                    let jitter: f64 = rng.gen_range(-0.05..0.05);
                    Some(((vendor_confidence + jitter).clamp(0.0, 1.0) * 100.0).round() / 100.0)
                };

                predictions.push(Prediction {
                    normalized_item_id: normalize_item_id(item),
                    item_name: Some(item.to_string()),
                    vendor_name: Some(vendor.to_string()),
                    forecast_quantity: Some(qty),
                    lower_bound: Some((qty - spread).max(0.0)),
                    upper_bound: Some(qty + spread),
                    order_index: config.with_order_index.then_some(cycle as i64),
                    delivery_date: Some(format_iso(date)),
                    forecast_date: Some(format_iso(date)),
                    delivery_pattern_confidence: confidence,
                    lead_time_days: Some(lead_time),
                    unit: Some(unit.to_string()),
                });
            }
        }
    }

    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{build_delivery_groups, select_strategy, GroupingStrategy};
    use rand::rngs::StdRng;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_normalize_item_id() {
        assert_eq!(normalize_item_id("Ground Beef 80/20"), "ground_beef_80_20");
        assert_eq!(normalize_item_id("All-Purpose Flour"), "all_purpose_flour");
    }

    #[test]
    fn test_generation_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = SyntheticConfig::new(start());
        let preds = generate_predictions(&config, &mut rng);
        assert_eq!(preds.len(), 3 * 4 * DELIVERY_BUCKETS);
        assert!(preds.iter().all(|p| p.resolved_date().is_some_and(|d| d > start())));
        assert!(preds
            .iter()
            .all(|p| p.lower_bound.unwrap() <= p.forecast_quantity.unwrap()));
        assert_eq!(select_strategy(&preds), GroupingStrategy::ByOrderIndex);
        assert_eq!(build_delivery_groups(&preds).len(), DELIVERY_BUCKETS);
    }

    #[test]
    fn test_date_only_generation() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SyntheticConfig {
            with_order_index: false,
            ..SyntheticConfig::new(start())
        };
        let preds = generate_predictions(&config, &mut rng);
        assert!(preds.iter().all(|p| p.order_index.is_none()));
        assert_eq!(select_strategy(&preds), GroupingStrategy::ByDate);
    }

    #[test]
    fn test_validate_rate() {
        let mut config = SyntheticConfig::new(start());
        assert!(config.validate().is_ok());

        config.missing_confidence_rate = 1.0;
        assert!(config.validate().is_ok());

        for bad in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
            config.missing_confidence_rate = bad;
            assert!(config.validate().is_err(), "accepted {}", bad);
        }

        // unvalidated NaN generates with every confidence present
        config.missing_confidence_rate = f64::NAN;
        let preds = generate_predictions(&config, &mut StdRng::seed_from_u64(3));
        assert!(preds.iter().all(|p| p.delivery_pattern_confidence.is_some()));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = SyntheticConfig::new(start());
        let a = generate_predictions(&config, &mut StdRng::seed_from_u64(1));
        let b = generate_predictions(&config, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
