//! # Temporal Helpers: Lenient Date Parsing
//!
//! Date inputs arrive from form controls and JSON documents in many shapes.
//! [`parse_date`] accepts the shapes a browser's `Date.parse` accepts in
//! practice and normalizes them to `DateTime<Utc>`:
//!
//! - RFC 3339 / ISO 8601 with offset: `2024-03-05T10:30:00Z`, `...+02:00`
//! - RFC 2822: `Tue, 5 Mar 2024 10:30:00 +0000`
//! - Naive date-times: `2024-03-05T10:30`, `2024-03-05 10:30:00.250`
//! - Dates: `2024-03-05`, `2024/03/05`, `03/05/2024` (month first)
//!
//! Inputs without an offset are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::FormkitError;

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// A parsed date input, before any offset decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedDate {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

fn parse_components(input: &str) -> Option<ParsedDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedDate::Zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(ParsedDate::Zoned(dt));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ParsedDate::Naive(naive));
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(ParsedDate::Naive(date.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}

/// Parse a date string into a UTC instant.
///
/// # Errors
///
/// Returns [`FormkitError::InvalidDate`] if the input is empty or matches
/// none of the accepted formats.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, FormkitError> {
    match parse_components(input) {
        Some(ParsedDate::Zoned(dt)) => Ok(dt.with_timezone(&Utc)),
        Some(ParsedDate::Naive(naive)) => Ok(Utc.from_utc_datetime(&naive)),
        None => Err(FormkitError::InvalidDate(input.to_string())),
    }
}

/// Returns true if `input` parses as a date.
pub fn is_date(input: &str) -> bool {
    parse_components(input).is_some()
}

/// Re-anchor a date so its UTC wall clock equals the wall clock the user saw.
///
/// Inputs without an offset already denote a wall-clock time and are
/// returned as that wall clock in UTC. Inputs carrying an offset are first
/// shown in `user_offset`, and that wall clock is returned in UTC. Empty or
/// unparseable inputs yield `None`.
pub fn date_without_timezone_shift(
    input: &str,
    user_offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let naive = match parse_components(input)? {
        ParsedDate::Naive(naive) => naive,
        ParsedDate::Zoned(dt) => dt.with_timezone(&user_offset).naive_local(),
    };
    Some(Utc.from_utc_datetime(&naive))
}

/// Render a date as `M/D/YYYY` (en-US short date, no padding).
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%-m/%-d/%Y").to_string()
}

/// Render a date as ISO 8601 with milliseconds and `Z` suffix.
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
