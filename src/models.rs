use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_api_date;

/// Date key used when a prediction carries neither a delivery nor a forecast date
pub const UNKNOWN_DATE_KEY: &str = "unknown";

/// Raw record from CSV ingestion (flat export of the predictions endpoint)
#[derive(Debug, Deserialize)]
pub struct CsvRecord {
    pub normalized_item_id: String,
    pub item_name: Option<String>,
    pub vendor_name: Option<String>,
    pub forecast_quantity: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub order_index: Option<i64>,
    pub delivery_date: Option<String>,
    pub forecast_date: Option<String>,
    pub delivery_pattern_confidence: Option<f64>,
    pub lead_time_days: Option<i64>,
    pub unit: Option<String>,
}

/// Forecasted need for one item from one vendor on one future date.
///
/// Every field except the item id is optional on the wire. There is no single
/// key field: identity is (item id, vendor, forecast date).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub normalized_item_id: String,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub forecast_quantity: Option<f64>,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
    /// Which of the next four delivery cycles (0-3) this belongs to
    #[serde(default)]
    pub order_index: Option<i64>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub forecast_date: Option<String>,
    #[serde(default)]
    pub delivery_pattern_confidence: Option<f64>,
    #[serde(default)]
    pub lead_time_days: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Prediction {
    /// `item_name` when present and non-empty, otherwise the normalized id
    pub fn display_name(&self) -> &str {
        match self.item_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.normalized_item_id,
        }
    }

    /// Vendor name used for sorting; missing vendors sort as ""
    pub fn vendor_key(&self) -> &str {
        self.vendor_name.as_deref().unwrap_or("")
    }

    /// Literal date key: delivery date, then forecast date, then "unknown"
    pub fn date_key(&self) -> &str {
        self.delivery_date
            .as_deref()
            .or(self.forecast_date.as_deref())
            .unwrap_or(UNKNOWN_DATE_KEY)
    }

    /// Calendar date of the date key, if it parses
    pub fn resolved_date(&self) -> Option<NaiveDate> {
        parse_api_date(self.date_key())
    }

    pub fn quantity(&self) -> f64 {
        self.forecast_quantity.unwrap_or(0.0)
    }
}

/// Delivery pattern detected for a vendor by the forecasting service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorPattern {
    pub vendor_name: String,
    #[serde(default)]
    pub delivery_days: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub avg_lead_time_days: Option<f64>,
}

/// Treat empty CSV cells as absent
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

impl CsvRecord {
    pub fn to_prediction(&self) -> Prediction {
        Prediction {
            normalized_item_id: self.normalized_item_id.clone(),
            item_name: non_empty(&self.item_name),
            vendor_name: non_empty(&self.vendor_name),
            forecast_quantity: self.forecast_quantity,
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
            order_index: self.order_index,
            delivery_date: non_empty(&self.delivery_date),
            forecast_date: non_empty(&self.forecast_date),
            delivery_pattern_confidence: self.delivery_pattern_confidence,
            lead_time_days: self.lead_time_days,
            unit: non_empty(&self.unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut p = Prediction {
            normalized_item_id: "chicken_breast".into(),
            item_name: Some("Chicken Breast".into()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "Chicken Breast");

        p.item_name = Some(String::new());
        assert_eq!(p.display_name(), "chicken_breast");

        p.item_name = None;
        assert_eq!(p.display_name(), "chicken_breast");
    }

    #[test]
    fn test_date_key_fallback() {
        let mut p = Prediction {
            delivery_date: Some("2024-05-01".into()),
            forecast_date: Some("2024-04-30".into()),
            ..Default::default()
        };
        assert_eq!(p.date_key(), "2024-05-01");

        p.delivery_date = None;
        assert_eq!(p.date_key(), "2024-04-30");

        p.forecast_date = None;
        assert_eq!(p.date_key(), UNKNOWN_DATE_KEY);
        assert_eq!(p.resolved_date(), None);
    }

    #[test]
    fn test_vendor_key_and_quantity_defaults() {
        let p = Prediction::default();
        assert_eq!(p.vendor_key(), "");
        assert_eq!(p.quantity(), 0.0);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{
            "normalized_item_id": "oil",
            "vendor_name": "Sysco",
            "order_index": 2,
            "extra_field": "ignored"
        }"#;
        let p: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(p.order_index, Some(2));
        assert_eq!(p.vendor_name.as_deref(), Some("Sysco"));
        assert!(p.delivery_date.is_none());
    }

    #[test]
    fn test_csv_record_blank_cells() {
        let record = CsvRecord {
            normalized_item_id: "tomato".into(),
            item_name: Some("  ".into()),
            vendor_name: Some("US Foods".into()),
            forecast_quantity: Some(4.0),
            lower_bound: None,
            upper_bound: None,
            order_index: None,
            delivery_date: Some(String::new()),
            forecast_date: Some("2024-05-02".into()),
            delivery_pattern_confidence: None,
            lead_time_days: None,
            unit: None,
        };
        let p = record.to_prediction();
        assert_eq!(p.item_name, None);
        assert_eq!(p.delivery_date, None);
        assert_eq!(p.date_key(), "2024-05-02");
    }
}
