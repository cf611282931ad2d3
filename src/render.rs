//! Terminal cards for the ordering dashboard.
//!
//! Everything here only formats; the numbers come from `grouping` and `stats`.

use std::fmt::Write;

use crate::dates::format_day_label;
use crate::format::{
    confidence_tone, format_bounds, format_percent, format_quantity, truncate_name,
};
use crate::grouping::DeliveryGroup;
use crate::models::Prediction;
use crate::stats::OrderingStats;

const WIDTH: usize = 78;

fn section_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", "═".repeat(WIDTH));
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", "═".repeat(WIDTH));
}

pub fn render_stats(stats: &OrderingStats) -> String {
    let mut out = String::new();
    section_header(&mut out, "ORDERING OVERVIEW");

    let next = stats
        .earliest_delivery
        .map(format_day_label)
        .unwrap_or_else(|| "—".to_string());
    let confidence = if stats.avg_confidence > 0.0 {
        format!(
            "{} {}",
            confidence_tone(stats.avg_confidence).marker(),
            format_percent(stats.avg_confidence)
        )
    } else {
        "—".to_string()
    };

    let _ = writeln!(out, "  {:24} {:>12}", "Items to order", stats.total_items);
    let _ = writeln!(out, "  {:24} {:>12}", "Total quantity", format_quantity(stats.total_quantity));
    let _ = writeln!(out, "  {:24} {:>12}", "Vendors", stats.unique_vendors);
    let _ = writeln!(out, "  {:24} {:>12}", "Deliveries this week", stats.deliveries_this_week);
    let _ = writeln!(out, "  {:24} {:>12}", "Low-confidence items", stats.low_confidence_items);
    let _ = writeln!(out, "  {:24} {:>12}", "Avg pattern confidence", confidence);
    let _ = writeln!(out, "  {:24} {:>12}", "Next delivery", next);
    out
}

fn render_row(out: &mut String, p: &Prediction) {
    let mut qty = format_quantity(p.quantity());
    if let Some(unit) = &p.unit {
        qty = format!("{} {}", qty, unit);
    }
    let range = format_bounds(p.lower_bound, p.upper_bound).unwrap_or_default();
    let confidence = p
        .delivery_pattern_confidence
        .map(|c| format!("{} {}", confidence_tone(c).marker(), format_percent(c)))
        .unwrap_or_default();

    let _ = writeln!(
        out,
        "    {:18} {:24} {:>10} {:>9} {:>8}",
        truncate_name(p.vendor_key(), 18),
        truncate_name(p.display_name(), 24),
        qty,
        range,
        confidence
    );
}

pub fn render_group(group: &DeliveryGroup) -> String {
    let mut out = String::new();
    let mut title = group.label.clone();
    if let Some(hint) = &group.lead_time_hint {
        let _ = write!(title, " · {}", hint);
    }
    let _ = writeln!(out, "\n  {}", title);
    let _ = writeln!(out, "  {}", "─".repeat(WIDTH - 4));

    if group.is_empty() {
        let _ = writeln!(out, "    No items");
        return out;
    }

    let _ = writeln!(
        out,
        "    {} items · {} vendors · qty {}",
        group.len(),
        group.vendor_count(),
        format_quantity(group.total_quantity())
    );
    for p in &group.predictions {
        render_row(&mut out, p);
    }
    out
}

pub fn render_groups(groups: &[DeliveryGroup]) -> String {
    let mut out = String::new();
    section_header(&mut out, "UPCOMING DELIVERIES");
    if groups.is_empty() {
        let _ = writeln!(out, "  No predictions to show");
    }
    for group in groups {
        out.push_str(&render_group(group));
    }
    out
}

pub fn render_dashboard(stats: &OrderingStats, groups: &[DeliveryGroup]) -> String {
    format!("{}\n{}", render_stats(stats), render_groups(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::build_delivery_groups;
    use crate::stats::compute_ordering_stats_at;
    use chrono::NaiveDate;

    fn sample() -> Vec<Prediction> {
        vec![
            Prediction {
                normalized_item_id: "chicken".into(),
                item_name: Some("Chicken".into()),
                vendor_name: Some("Sysco".into()),
                forecast_quantity: Some(12.0),
                lower_bound: Some(10.0),
                upper_bound: Some(15.0),
                order_index: Some(0),
                delivery_date: Some("2024-05-01".into()),
                delivery_pattern_confidence: Some(0.9),
                lead_time_days: Some(1),
                unit: Some("lb".into()),
                ..Default::default()
            },
            Prediction {
                normalized_item_id: "oil".into(),
                vendor_name: Some("Sysco".into()),
                order_index: Some(2),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_group_card() {
        let groups = build_delivery_groups(&sample());
        let card = render_group(&groups[0]);
        assert!(card.contains("Wed, May 1 · 1 day lead time"));
        assert!(card.contains("12 lb"));
        assert!(card.contains("10–15"));
        assert!(card.contains("🟢 90%"));

        assert!(render_group(&groups[1]).contains("No items"));
        assert!(render_group(&groups[2]).contains("Delivery #3"));
    }

    #[test]
    fn test_stats_card() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 28).unwrap();
        let stats = compute_ordering_stats_at(&sample(), &[], today);
        let card = render_stats(&stats);
        assert!(card.contains("ORDERING OVERVIEW"));
        assert!(card.contains("Wed, May 1"));
        assert!(card.contains("90%"));
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = compute_ordering_stats_at(&[], &[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let text = render_dashboard(&stats, &[]);
        assert!(text.contains("No predictions to show"));
        assert!(text.contains("—"));
    }
}
