//! Best-effort coercion of request text into numbers and dates
//!
//! Nothing here rejects input. Malformed text yields `None` and the caller
//! decides how to carry that through.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses the leading base-10 integer of `input`.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit, so `"30.7"` and `"30min"` both yield `30`. Returns `None` when
/// no digit is found or the value overflows.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%a %b %d %Y", "%b %d %Y"];

/// Parses a calendar date or timestamp. Times without an offset are UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("30"), Some(30));
        assert_eq!(parse_int("30.7"), Some(30));
        assert_eq!(parse_int("  45min"), Some(45));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+12"), Some(12));
    }

    #[test]
    fn test_parse_int_not_a_number() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(".5"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        assert_eq!(
            parse_date("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(
            parse_date("2024-03-10T23:30:00-02:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 11, 1, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(
            parse_date("2024-05-06T07:08"),
            Some(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rendered_form() {
        assert_eq!(
            parse_date("Mon Jan 01 2024"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }
}
