//! Parsing and rendering of exercise dates.
//!
//! Dates travel over the wire as calendar strings and are stored as UTC
//! timestamps. A date without a time of day means midnight UTC of that day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const CALENDAR_FORMAT: &str = "%a %b %d %Y";

/// Day-only layouts, tried in order. Includes `CALENDAR_FORMAT` so a rendered
/// date can be sent back as input.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    CALENDAR_FORMAT,
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Parse a client-supplied date: `2023-01-15`, `2023/01/15`, `Sun Jan 15 2023`,
/// `January 15, 2023`, `2023-01-15T10:30:00`, or a full RFC 3339 timestamp.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
    {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Render a timestamp as a calendar-date string, e.g. `Sun Jan 15 2023`.
pub fn format_calendar_date(date: &DateTime<Utc>) -> String {
    date.format(CALENDAR_FORMAT).to_string()
}
