//! Display formatting for dashboard cards and tables

use serde::Serialize;

/// Confidence at or above this renders as success
pub const SUCCESS_CONFIDENCE: f64 = 0.8;

/// Confidence at or above this (and below success) renders as warning
pub const WARNING_CONFIDENCE: f64 = 0.6;

/// Color tone for a confidence badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn marker(self) -> &'static str {
        match self {
            Tone::Success => "🟢",
            Tone::Warning => "🟠",
            Tone::Danger => "🔴",
        }
    }
}

pub fn confidence_tone(confidence: f64) -> Tone {
    if confidence >= SUCCESS_CONFIDENCE {
        Tone::Success
    } else if confidence >= WARNING_CONFIDENCE {
        Tone::Warning
    } else {
        Tone::Danger
    }
}

/// "1 day lead time" / "3 days lead time"
pub fn lead_time_hint(days: i64) -> String {
    let unit = if days == 1 { "day" } else { "days" };
    format!("{} {} lead time", days, unit)
}

/// Quantity with at most one decimal; whole numbers drop the ".0"
pub fn format_quantity(qty: f64) -> String {
    let rounded = (qty * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// 0.65 -> "65%"
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Forecast range, e.g. "10–15"; a single known bound is shown alone
pub fn format_bounds(lower: Option<f64>, upper: Option<f64>) -> Option<String> {
    match (lower, upper) {
        (Some(lo), Some(hi)) => Some(format!("{}–{}", format_quantity(lo), format_quantity(hi))),
        (Some(lo), None) => Some(format!("≥{}", format_quantity(lo))),
        (None, Some(hi)) => Some(format!("≤{}", format_quantity(hi))),
        (None, None) => None,
    }
}

/// Shorten a name for table columns
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let head: String = name.chars().take(keep).collect();
    format!("{}...", head)
}
