use chrono::{DateTime, NaiveDate};

/// Format a date string as `"<weekday>, <day> <month>"`, e.g. `"Sat, 25 Nov"`.
///
/// Accepts plain `YYYY-MM-DD` dates or RFC 3339 timestamps; anything else
/// renders as `"Invalid date"`.
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%a, %-d %b").to_string(),
        None => "Invalid date".to_string(),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Truncate an `HH:MM:SS` time to `HH:MM`. Empty input passes through, as do
/// strings without a seconds component.
pub fn format_time(value: &str) -> &str {
    match value.match_indices(':').nth(1) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
