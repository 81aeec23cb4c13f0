//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Accepted frontmatter date formats, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a frontmatter date string in any of the accepted formats
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Format a raw frontmatter date for display (like "January 1, 2024"),
/// falling back to the raw string when it does not parse
pub fn display_date(raw: &str, format: &str) -> String {
    match parse_date(raw) {
        Some(dt) => dt.format(format).to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("2024/01/15").is_some());
        assert!(parse_date("2024-01-15 10:30:00").is_some());
        assert!(parse_date("2024-01-15T10:30:00").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("2024-13-45").is_none());
    }

    #[test]
    fn test_parse_date_midnight_for_date_only() {
        let dt = parse_date("2024-01-15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-01-15", "%B %-d, %Y"), "January 15, 2024");
        assert_eq!(display_date("garbled", "%B %-d, %Y"), "garbled");
    }
}
