//! Best-effort parsing of publication dates found in the wild.
//!
//! Syndication feeds carry structured timestamps, but heuristic HTML
//! extraction surfaces whatever string a `<time>` element happens to hold:
//! an RFC 3339 `datetime` attribute, an RFC 2822 date, or a bare
//! `2025-08-07`-style date. [`parse_loose`] tries the common encodings in
//! order and gives up quietly, since an unparseable date is not an error in
//! this pipeline.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive datetime layouts seen on article listing pages.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Try to interpret a raw date string as a UTC timestamp.
///
/// Attempts, in order: RFC 3339, RFC 2822, a small set of naive datetime
/// layouts, and finally a bare `YYYY-MM-DD` date (midnight UTC). Returns
/// `None` when nothing matches; callers treat that as "no known date".
pub fn parse_loose(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}
