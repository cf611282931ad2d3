//! Dashboard filters, applied before grouping and stats

use serde::{Deserialize, Serialize};

use crate::models::Prediction;
use crate::stats::is_low_confidence;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// Exact vendor name
    pub vendor: Option<String>,
    /// Case-insensitive substring of the item name or id
    pub search: Option<String>,
    pub low_confidence_only: bool,
}

impl DashboardFilter {
    pub fn is_empty(&self) -> bool {
        self.vendor.is_none() && self.search_term().is_none() && !self.low_confidence_only
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, p: &Prediction) -> bool {
        if let Some(vendor) = &self.vendor {
            if p.vendor_name.as_deref() != Some(vendor.as_str()) {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            let name_hit = p.display_name().to_lowercase().contains(&term);
            let id_hit = p.normalized_item_id.to_lowercase().contains(&term);
            if !name_hit && !id_hit {
                return false;
            }
        }
        !self.low_confidence_only || is_low_confidence(p)
    }

    /// Matching predictions, in input order
    pub fn apply(&self, predictions: &[Prediction]) -> Vec<Prediction> {
        predictions.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Prediction> {
        vec![
            Prediction {
                normalized_item_id: "chicken_thigh".into(),
                item_name: Some("Chicken Thighs".into()),
                vendor_name: Some("Sysco".into()),
                delivery_pattern_confidence: Some(0.9),
                ..Default::default()
            },
            Prediction {
                normalized_item_id: "roma_tomato".into(),
                item_name: Some("Tomatoes".into()),
                vendor_name: Some("US Foods".into()),
                delivery_pattern_confidence: Some(0.4),
                ..Default::default()
            },
            Prediction {
                normalized_item_id: "canola_oil".into(),
                vendor_name: Some("Sysco".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let filter = DashboardFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()), sample());
    }

    #[test]
    fn test_vendor_filter() {
        let filter = DashboardFilter {
            vendor: Some("Sysco".into()),
            ..Default::default()
        };
        let out = filter.apply(&sample());
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.vendor_key() == "Sysco"));
    }

    #[test]
    fn test_search_matches_name_or_id() {
        let by_name = DashboardFilter {
            search: Some("  CHICKEN ".into()),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&sample()).len(), 1);

        let by_id = DashboardFilter {
            search: Some("roma".into()),
            ..Default::default()
        };
        assert_eq!(by_id.apply(&sample())[0].display_name(), "Tomatoes");

        let blank = DashboardFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(blank.is_empty());
    }

    #[test]
    fn test_low_confidence_only() {
        let filter = DashboardFilter {
            low_confidence_only: true,
            ..Default::default()
        };
        let out = filter.apply(&sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].normalized_item_id, "roma_tomato");
    }
}
