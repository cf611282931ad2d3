//! CSV export of the grouped order sheet

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::dates::format_iso;
use crate::grouping::DeliveryGroup;

/// One exported row: a prediction within its delivery window
#[derive(Debug, Serialize)]
struct OrderSheetRow<'a> {
    delivery: &'a str,
    delivery_date: Option<String>,
    vendor: &'a str,
    item: &'a str,
    quantity: f64,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    confidence: Option<f64>,
    lead_time_days: Option<i64>,
}

/// Write every prediction of every group, in display order. Returns rows written.
pub fn write_order_sheet<W: Write>(groups: &[DeliveryGroup], writer: W) -> Result<usize> {
    let mut csv = WriterBuilder::new().has_headers(true).from_writer(writer);
    let mut rows = 0;

    for group in groups {
        let delivery_date = group.date.map(format_iso);
        for p in &group.predictions {
            csv.serialize(OrderSheetRow {
                delivery: &group.label,
                delivery_date: delivery_date.clone(),
                vendor: p.vendor_key(),
                item: p.display_name(),
                quantity: p.quantity(),
                lower_bound: p.lower_bound,
                upper_bound: p.upper_bound,
                confidence: p.delivery_pattern_confidence,
                lead_time_days: p.lead_time_days,
            })?;
            rows += 1;
        }
    }

    csv.flush()?;
    Ok(rows)
}

pub fn export_to_path(groups: &[DeliveryGroup], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_order_sheet(groups, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::build_delivery_groups;
    use crate::models::Prediction;

    fn sample_groups() -> Vec<DeliveryGroup> {
        build_delivery_groups(&[
            Prediction {
                normalized_item_id: "oil".into(),
                item_name: Some("Canola Oil".into()),
                vendor_name: Some("Sysco".into()),
                forecast_quantity: Some(3.0),
                order_index: Some(0),
                delivery_date: Some("2024-05-01".into()),
                delivery_pattern_confidence: Some(0.85),
                ..Default::default()
            },
            Prediction {
                normalized_item_id: "eggs".into(),
                vendor_name: Some("US Foods, Inc".into()),
                order_index: Some(2),
                lead_time_days: Some(2),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_order_sheet_rows() {
        let mut buf = Vec::new();
        let rows = write_order_sheet(&sample_groups(), &mut buf).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "delivery,delivery_date,vendor,item,quantity,lower_bound,upper_bound,confidence,lead_time_days"
        );
        assert_eq!(lines[1], "\"Wed, May 1\",2024-05-01,Sysco,Canola Oil,3.0,,,0.85,");
        assert_eq!(lines[2], "Delivery #3,,\"US Foods, Inc\",eggs,0.0,,,,2");
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order_sheet.csv");
        let rows = export_to_path(&sample_groups(), &path).unwrap();
        assert_eq!(rows, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn test_empty_groups_write_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_order_sheet(&[], &mut buf).unwrap(), 0);
        // csv writes the header lazily with the first record
        assert!(buf.is_empty());
    }
}
