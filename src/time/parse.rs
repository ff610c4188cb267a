//! Civil date-time parsing
//!
//! Accepted forms are `YYYY-M-D`, optionally followed by `H:M` or `H:M:S`
//! (fractional seconds allowed), with `-` or `/` between date fields and a
//! space or `T` before the time. The compact `YYYYMMDD` key form is accepted
//! as well. A missing time means midnight.

use super::{Result, TimeError};
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_TIME: Regex = Regex::new(concat!(
        r"^(-?\d{1,4})[-/](\d{1,2})[-/](\d{1,2})",
        r"(?:[ T]+(\d{1,2}):(\d{1,2})(?::(\d{1,2})(\.\d+)?)?)?$",
    ))
    .unwrap();
    static ref COMPACT_DATE: Regex = Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap();
}

fn field<T: std::str::FromStr>(text: &str, value: Option<regex::Match>) -> Result<T> {
    match value {
        None => Err(TimeError::InvalidFormat(text.to_string())),
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| TimeError::InvalidFormat(text.to_string())),
    }
}

fn optional_field(text: &str, value: Option<regex::Match>) -> Result<u32> {
    match value {
        None => Ok(0),
        some => field(text, some),
    }
}

/// Parse a civil date-time string into a naive (zone-less) date-time
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimeError::InvalidFormat("empty date string".to_string()));
    }

    let (year, month, day, hour, minute, second, nanos) =
        if let Some(caps) = DATE_TIME.captures(trimmed) {
            let nanos = match caps.get(7) {
                None => 0,
                Some(m) => {
                    let fraction: f64 = format!("0{}", m.as_str())
                        .parse()
                        .map_err(|_| TimeError::InvalidFormat(text.to_string()))?;
                    ((fraction * 1e9).round() as u32).min(999_999_999)
                }
            };
            (
                field::<i32>(text, caps.get(1))?,
                field::<u32>(text, caps.get(2))?,
                field::<u32>(text, caps.get(3))?,
                optional_field(text, caps.get(4))?,
                optional_field(text, caps.get(5))?,
                optional_field(text, caps.get(6))?,
                nanos,
            )
        } else if let Some(caps) = COMPACT_DATE.captures(trimmed) {
            (
                field::<i32>(text, caps.get(1))?,
                field::<u32>(text, caps.get(2))?,
                field::<u32>(text, caps.get(3))?,
                0,
                0,
                0,
                0,
            )
        } else {
            return Err(TimeError::InvalidFormat(text.to_string()));
        };

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanos))
        .ok_or_else(|| TimeError::InvalidFormat(format!("{} is not a valid date-time", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    #[rstest]
    #[case("2019-12-22", (2019, 12, 22, 0, 0, 0))]
    #[case("2019-12-22 12:19", (2019, 12, 22, 12, 19, 0))]
    #[case("2019-12-22 12:19:18", (2019, 12, 22, 12, 19, 18))]
    #[case("2020/3/5 7:04:09", (2020, 3, 5, 7, 4, 9))]
    #[case("2020-03-20T11:49:00", (2020, 3, 20, 11, 49, 0))]
    #[case("  2021-6-1  ", (2021, 6, 1, 0, 0, 0))]
    #[case("20191222", (2019, 12, 22, 0, 0, 0))]
    fn test_accepted_forms(#[case] text: &str, #[case] expected: (i32, u32, u32, u32, u32, u32)) {
        let dt = parse_datetime(text).unwrap();
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute(), dt.second()),
            expected
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let dt = parse_datetime("2020-01-01 00:00:01.5").unwrap();
        assert_eq!(dt.second(), 1);
        assert_eq!(dt.nanosecond(), 500_000_000);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not a date")]
    #[case("2019-13-01")]
    #[case("2019-02-29")]
    #[case("2019-12-22 25:00")]
    #[case("2019-12-22 12:60")]
    #[case("2019-12")]
    #[case("2019.12.22")]
    fn test_rejected_forms(#[case] text: &str) {
        assert!(matches!(
            parse_datetime(text),
            Err(TimeError::InvalidFormat(_))
        ));
    }
}
