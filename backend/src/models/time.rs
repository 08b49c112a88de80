//! Calendar-date handling for the reading table and target-date queries.

use chrono::{DateTime, NaiveDate};

/// Canonical textual form of a calendar date (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalise a date cell or query parameter to a calendar date.
///
/// Accepts `YYYY-MM-DD` (surrounding whitespace ignored) and RFC 3339
/// timestamps, whose date part is taken as written.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Format a calendar date in the canonical `YYYY-MM-DD` form.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_calendar_date("2025-02-14"),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            parse_calendar_date("  2025-02-14\r"),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
    }

    #[test]
    fn test_parse_rfc3339_keeps_local_date_part() {
        assert_eq!(
            parse_calendar_date("2025-02-14T23:30:00+05:00"),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_calendar_date("").is_none());
        assert!(parse_calendar_date("14/02/2025").is_none());
        assert!(parse_calendar_date("2025-13-01").is_none());
    }

    #[test]
    fn test_format_roundtrip_form() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_calendar_date(date), "2024-01-05");
    }
}
