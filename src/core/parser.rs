// DeliverySleuth - core/parser.rs
//
// Line-level parsing of delivery log records:
//   <YYYY-MM-DD>T<HH:MM> <YYYY-MM-DD> <HH:MM>-<HH:MM>
//
// Extraction runs five independent regex scans over the line; validation
// turns the captured strings into chrono date-times. Core layer: pure
// functions over &str, no I/O.

use crate::core::model::{ParsedDelivery, RawFields};
use crate::util::constants::{DATE_FORMAT, TIME_FORMAT};
use crate::util::error::LineError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Compiled field patterns, one per extracted field.
struct FieldPatterns {
    delivery_date: Regex,
    delivery_time: Regex,
    expected_date: Regex,
    window_start: Regex,
    window_end: Regex,
}

fn patterns() -> &'static FieldPatterns {
    static PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        // Patterns are fixed literals exercised by the unit tests below, so a
        // mistake shows up as a failing test rather than a runtime panic.
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("parser: invalid field regex")
        }

        FieldPatterns {
            delivery_date: re(r"(\d{4}-\d{2}-\d{2})T"),
            delivery_time: re(r"T(\d{2}:\d{2})"),
            expected_date: re(r"(?:^|\s)(\d{4}-\d{2}-\d{2})(?:\s|$)"),
            window_start: re(r"\s(\d{2}:\d{2})"),
            window_end: re(r"-(\d{2}:\d{2})"),
        }
    })
}

/// First capture group of the first match of `re` in `line`.
fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Pull the five raw fields out of a line.
///
/// Each field is an independent scan of the whole line; the first one that
/// finds nothing decides the error.
pub fn extract_fields(line: &str) -> Result<RawFields<'_>, LineError> {
    let p = patterns();

    let delivery_date = capture(&p.delivery_date, line).ok_or(LineError::MissingDeliveryDate)?;
    let delivery_time = capture(&p.delivery_time, line).ok_or(LineError::MissingDeliveryTime)?;
    let expected_date = capture(&p.expected_date, line).ok_or(LineError::MissingExpectedDate)?;
    let window_start = capture(&p.window_start, line).ok_or(LineError::MissingWindowStart)?;
    let window_end = capture(&p.window_end, line).ok_or(LineError::MissingWindowEnd)?;

    Ok(RawFields {
        delivery_date,
        delivery_time,
        expected_date,
        window_start,
        window_end,
    })
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` time into one date-time.
///
/// Returns `None` for anything that is not a real calendar date or time of
/// day (month 13, Feb 30, hour 24, minute 60, ...).
fn combine(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;
    Some(date.and_time(time))
}

/// Validate raw fields into a `ParsedDelivery`.
pub fn parse_fields(raw: &RawFields<'_>) -> Result<ParsedDelivery, LineError> {
    let delivered_at = combine(raw.delivery_date, raw.delivery_time)
        .ok_or(LineError::InvalidDeliveryDateTime)?;
    let window_start =
        combine(raw.expected_date, raw.window_start).ok_or(LineError::InvalidWindowStart)?;
    let window_end =
        combine(raw.expected_date, raw.window_end).ok_or(LineError::InvalidWindowEnd)?;

    if window_start > window_end {
        return Err(LineError::InvertedWindow);
    }

    Ok(ParsedDelivery {
        delivered_at,
        expected_date: raw.expected_date.to_owned(),
        window_start,
        window_end,
    })
}

/// Extract and validate one line.
pub fn parse_line(line: &str) -> Result<ParsedDelivery, LineError> {
    let raw = extract_fields(line)?;
    parse_fields(&raw)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_extract_well_formed_line() {
        let raw = extract_fields("2020-12-05T13:32 2020-12-05 13:30-14:00").unwrap();
        assert_eq!(
            raw,
            RawFields {
                delivery_date: "2020-12-05",
                delivery_time: "13:32",
                expected_date: "2020-12-05",
                window_start: "13:30",
                window_end: "14:00",
            }
        );
    }

    #[test]
    fn test_extract_expected_date_is_not_tied_to_delivery_date() {
        let raw = extract_fields("2020-12-04T23:50 2020-12-05 08:00-09:00").unwrap();
        assert_eq!(raw.delivery_date, "2020-12-04");
        assert_eq!(raw.expected_date, "2020-12-05");
    }

    #[test]
    fn test_extract_missing_fields_in_order() {
        let cases = [
            ("2020-12-05 13:32 2020-12-05 13:30-14:00", LineError::MissingDeliveryDate),
            ("2020-12-05T1332 2020-12-05 13:30-14:00", LineError::MissingDeliveryTime),
            ("2020-12-05T13:32 13:30-14:00", LineError::MissingExpectedDate),
            ("2020-12-05T13:32 2020-12-05 13.30-14:00", LineError::MissingWindowStart),
            ("2020-12-05T13:32 2020-12-05 13:30 14:00", LineError::MissingWindowEnd),
            ("", LineError::MissingDeliveryDate),
            ("garbage", LineError::MissingDeliveryDate),
        ];
        for (line, expected) in cases {
            assert_eq!(extract_fields(line), Err(expected), "line: {line:?}");
        }
    }

    #[test]
    fn test_parse_line_builds_date_times() {
        let parsed = parse_line("2020-12-05T13:32 2020-12-05 13:30-14:00").unwrap();
        assert_eq!(parsed.delivered_at, dt("2020-12-05 13:32"));
        assert_eq!(parsed.expected_date, "2020-12-05");
        assert_eq!(parsed.window_start, dt("2020-12-05 13:30"));
        assert_eq!(parsed.window_end, dt("2020-12-05 14:00"));
    }

    #[test]
    fn test_parse_rejects_impossible_delivery_date_time() {
        assert_eq!(
            parse_line("2020-13-05T13:32 2020-12-05 13:30-14:00"),
            Err(LineError::InvalidDeliveryDateTime)
        );
        assert_eq!(
            parse_line("2020-12-05T25:32 2020-12-05 13:30-14:00"),
            Err(LineError::InvalidDeliveryDateTime)
        );
    }

    #[test]
    fn test_parse_rejects_impossible_window() {
        assert_eq!(
            parse_line("2021-02-28T13:32 2021-02-30 13:30-14:00"),
            Err(LineError::InvalidWindowStart)
        );
        assert_eq!(
            parse_line("2020-12-05T13:32 2020-12-05 13:60-14:00"),
            Err(LineError::InvalidWindowStart)
        );
        assert_eq!(
            parse_line("2020-12-05T13:32 2020-12-05 13:30-24:00"),
            Err(LineError::InvalidWindowEnd)
        );
    }

    #[test]
    fn test_parse_rejects_inverted_window() {
        assert_eq!(
            parse_line("2020-12-05T13:32 2020-12-05 14:00-13:30"),
            Err(LineError::InvertedWindow)
        );
    }

    #[test]
    fn test_parse_accepts_zero_width_window() {
        let parsed = parse_line("2020-12-05T13:30 2020-12-05 13:30-13:30").unwrap();
        assert_eq!(parsed.window_start, parsed.window_end);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert!(parse_line("  2020-12-05T13:32 2020-12-05 13:30-14:00  ").is_ok());
        assert!(parse_line("2020-12-05T13:32\t2020-12-05\t13:30-14:00").is_ok());
    }
}
