//! Timestamp parsing for ED visit events.
//!
//! Extracts arrive from several charting systems, so the parser accepts the
//! ISO 8601 family, RFC 3339 with an offset, slash-separated dates (year-first
//! or US month-first) and `15-Jan-2024` style dates. Date-only values resolve
//! to midnight. Partial dates (`2024-01`, `2024`) carry no usable clock time
//! and do not parse.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Datetime formats tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p", // 01/15/2024 02:30:00 PM
    "%m/%d/%Y %I:%M %p",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
];

/// Date-only formats tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y", // US: 01/15/2024
    "%d-%b-%Y", // 15-Jan-2024
];

/// Parse a timestamp, returning `None` for empty or unparseable text.
///
/// Values with a UTC offset are converted to UTC and the offset dropped.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .or_else(|| try_parse_rfc3339(trimmed))
        .or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_rfc3339(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_iso_variants() {
        let expected = dt(2024, 1, 15, 10, 30, 0);
        assert_eq!(parse_timestamp("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T10:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-01-15 10:30 "), Some(expected));
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-15 10:30:45.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_offsets_convert_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00+02:00"),
            Some(dt(2024, 1, 15, 8, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00Z"),
            Some(dt(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_slash_and_month_name_formats() {
        assert_eq!(
            parse_timestamp("2024/01/15 10:30"),
            Some(dt(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_timestamp("01/15/2024 10:30:00"),
            Some(dt(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_timestamp("01/15/2024 02:30 PM"),
            Some(dt(2024, 1, 15, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("15-Jan-2024 10:30"),
            Some(dt(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(parse_timestamp("2024-01-15"), Some(dt(2024, 1, 15, 0, 0, 0)));
        assert_eq!(parse_timestamp("01/15/2024"), Some(dt(2024, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a time"), None);
        assert_eq!(parse_timestamp("2024-13-01 10:00"), None);
        assert_eq!(parse_timestamp("2024-01"), None);
        assert_eq!(parse_timestamp("2024"), None);
        assert_eq!(parse_timestamp("25:00"), None);
    }
}
