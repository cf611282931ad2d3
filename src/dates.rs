//! Date handling for prediction records.
//!
//! The API sends ISO dates, sometimes with a time component. Only the calendar
//! date is kept: a timestamp's date is taken in whatever offset it was written
//! with, and no timezone conversion is applied. "Today" comes from the local
//! wall clock.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

/// Days after today that still count as "this week"
pub const WEEK_HORIZON_DAYS: i64 = 7;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an API date string into a calendar date.
///
/// Unparseable strings (including the "unknown" key) yield `None` so that they
/// behave as "no date" everywhere instead of corrupting sort order.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Short card label, e.g. "Wed, May 1"
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// ISO form used in exports and JSON, e.g. "2024-05-01"
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Local calendar date at call time
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// True when `date` falls in `[today, today + 7 days]`, both ends inclusive
pub fn is_within_week(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && date <= today + Duration::days(WEEK_HORIZON_DAYS)
}
