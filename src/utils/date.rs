//! Post date parsing and ordering.
//!
//! Index dates come from the site generator and are usually RFC 3339
//! (`2024-03-01T09:30:00+01:00`), but hand-written front matter also yields
//! bare dates (`2024-03-01`) and naive timestamps (`2024-03-01 09:30:00`).
//! Everything is normalized to UTC for comparison.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive formats tried after RFC 3339, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse an index date. Returns `None` for anything unrecognized.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Compare two optional raw dates, newest first.
///
/// Entries without a parseable date sort after every dated entry and keep
/// their relative order under a stable sort.
pub fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse);
    let b = b.and_then(parse);
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Human-readable date used when the index carries no `dateFormatted`.
///
/// `2024-03-01` → `Mar 1, 2024`
pub fn display(raw: &str) -> Option<String> {
    parse(raw).map(|dt| dt.format("%b %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse("2024-03-01T23:30:00-02:00").unwrap();
        // Normalized to UTC: next day
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 2));
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse("2024-02-29").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 2, 29));
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert!(parse("2024-03-01 09:30:00").is_some());
        assert!(parse("2024-03-01T09:30:00").is_some());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse("").is_none());
        assert!(parse("yesterday").is_none());
        assert!(parse("2023-02-29").is_none());
        assert!(parse("2024-13-01").is_none());
    }

    #[test]
    fn test_newest_first() {
        assert_eq!(newest_first(Some("2024-03-01"), Some("2024-01-01")), Ordering::Less);
        assert_eq!(newest_first(Some("2024-01-01"), Some("2024-03-01")), Ordering::Greater);
        assert_eq!(newest_first(Some("2024-01-01"), None), Ordering::Less);
        assert_eq!(newest_first(None, Some("garbage")), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(display("2024-03-01").as_deref(), Some("Mar 1, 2024"));
        assert_eq!(display("2024-12-25T10:00:00Z").as_deref(), Some("Dec 25, 2024"));
        assert_eq!(display("soon"), None);
    }
}
