//! Time module for solar-term calculations
//!
//! Instants are carried as plain Julian dates in three flavours, kept apart by
//! naming: Terrestrial Time (`jd_tt`), the UTC equivalent obtained by removing
//! ΔT (`jd_utc`), and a fixed-offset civil zone (`jd_local`). [`Timescale`]
//! moves an instant between them and turns it into a zoned `chrono` value.

pub mod calendar;
pub mod delta_t;
pub mod parse;

pub use calendar::{calendar_to_jd, days_in_month, is_leap_year, jd_to_calendar};
pub use delta_t::DeltaT;
pub use parse::parse_datetime;

use crate::constants::{
    DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_MILLENNIUM, DAY_S, DEFAULT_UTC_OFFSET_S,
    GREGORIAN_START_DATE, J2000,
};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};
use std::fmt;
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Calendar error: {0}")]
    CalendarError(String),

    #[error("Delta T is not defined for year {year}")]
    DeltaTOutOfRange { year: f64 },
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Julian millennia of TT since J2000, the time argument of VSOP87
pub fn julian_millennia(jd_tt: f64) -> f64 {
    (jd_tt - J2000) / DAYS_PER_JULIAN_MILLENNIUM
}

/// Julian centuries of TT since J2000
pub fn julian_centuries(jd_tt: f64) -> f64 {
    (jd_tt - J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Calendar tuple for representing a date and time
///
/// Years use astronomical numbering. Dates before 1582-10-15 are Julian
/// calendar dates, later ones Gregorian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarTuple {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight at the start of a date
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    pub fn to_jd(&self) -> Result<f64> {
        calendar_to_jd(self)
    }

    pub fn from_jd(jd: f64) -> Self {
        jd_to_calendar(jd)
    }

    /// Convert to a `chrono` date-time
    ///
    /// `chrono` counts in the proleptic Gregorian calendar, so Julian-calendar
    /// dates before the reform are refused rather than silently relabelled.
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        if (self.year, self.month, self.day) < GREGORIAN_START_DATE {
            return Err(TimeError::CalendarError(format!(
                "{} is a Julian calendar date",
                self
            )));
        }
        if !self.second.is_finite() || self.second < 0.0 {
            return Err(TimeError::CalendarError(format!(
                "second {} out of range",
                self.second
            )));
        }

        let whole = self.second.floor();
        let nanos = ((self.second - whole) * 1e9).round().min(999_999_999.0) as u32;

        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_nano_opt(self.hour, self.minute, whole as u32, nanos))
            .ok_or_else(|| TimeError::CalendarError(format!("{} is not a valid date-time", self)))
    }
}

impl From<(i32, u32, u32, u32, u32, f64)> for CalendarTuple {
    fn from(t: (i32, u32, u32, u32, u32, f64)) -> Self {
        Self::new(t.0, t.1, t.2, t.3, t.4, t.5)
    }
}

impl From<(i32, u32, u32)> for CalendarTuple {
    fn from(t: (i32, u32, u32)) -> Self {
        Self::date(t.0, t.1, t.2)
    }
}

impl From<NaiveDateTime> for CalendarTuple {
    fn from(dt: NaiveDateTime) -> Self {
        Self::new(
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second() as f64 + dt.nanosecond() as f64 / 1e9,
        )
    }
}

impl TryFrom<CalendarTuple> for NaiveDateTime {
    type Error = TimeError;

    fn try_from(cal: CalendarTuple) -> Result<Self> {
        cal.to_naive()
    }
}

impl fmt::Display for CalendarTuple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second.floor() as u32
        )
    }
}

/// Fixed offset for a number of seconds east of UTC
pub fn utc_offset_from_seconds(seconds: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| TimeError::InvalidFormat(format!("UTC offset {}s out of range", seconds)))
}

/// Conversions between Terrestrial Time, UTC and a fixed civil zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timescale {
    delta_t: DeltaT,
    utc_offset: FixedOffset,
}

impl Default for Timescale {
    /// Default ΔT model with China Standard Time as the civil zone
    fn default() -> Self {
        Self {
            delta_t: DeltaT::default(),
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_S).unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl Timescale {
    pub fn new(delta_t: DeltaT, utc_offset: FixedOffset) -> Self {
        Self {
            delta_t,
            utc_offset,
        }
    }

    pub fn delta_t(&self) -> &DeltaT {
        &self.delta_t
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    fn offset_days(&self) -> f64 {
        self.utc_offset.local_minus_utc() as f64 / DAY_S
    }

    /// Remove ΔT from a Terrestrial Time Julian date
    pub fn tt_to_utc(&self, jd_tt: f64) -> Result<f64> {
        Ok(jd_tt - self.delta_t.delta_t_for_jd(jd_tt)? / DAY_S)
    }

    /// Add ΔT to a UTC Julian date
    ///
    /// ΔT is a function of the TT instant, so the estimate is refined once;
    /// ΔT changes by far less than a second over the correction.
    pub fn utc_to_tt(&self, jd_utc: f64) -> Result<f64> {
        let mut jd_tt = jd_utc;
        for _ in 0..2 {
            jd_tt = jd_utc + self.delta_t.delta_t_for_jd(jd_tt)? / DAY_S;
        }
        Ok(jd_tt)
    }

    pub fn utc_to_local(&self, jd_utc: f64) -> f64 {
        jd_utc + self.offset_days()
    }

    pub fn local_to_utc(&self, jd_local: f64) -> f64 {
        jd_local - self.offset_days()
    }

    pub fn tt_to_local(&self, jd_tt: f64) -> Result<f64> {
        Ok(self.utc_to_local(self.tt_to_utc(jd_tt)?))
    }

    pub fn local_to_tt(&self, jd_local: f64) -> Result<f64> {
        self.utc_to_tt(self.local_to_utc(jd_local))
    }

    /// Civil calendar date of a TT instant in the configured zone
    pub fn civil_calendar(&self, jd_tt: f64) -> Result<CalendarTuple> {
        Ok(jd_to_calendar(self.tt_to_local(jd_tt)?))
    }

    /// Zoned date-time of a TT instant, rounded to the second
    pub fn civil_datetime(&self, jd_tt: f64) -> Result<DateTime<FixedOffset>> {
        let naive = self.civil_calendar(jd_tt)?.to_naive()?;
        self.utc_offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| TimeError::CalendarError(format!("no single instant for {}", naive)))
    }

    /// TT Julian date of a civil date-time in the configured zone
    pub fn tt_from_civil(&self, local: &NaiveDateTime) -> Result<f64> {
        self.local_to_tt(CalendarTuple::from(*local).to_jd()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_time_arguments() {
        assert_eq!(julian_millennia(J2000), 0.0);
        assert_relative_eq!(julian_millennia(J2000 + 365_250.0), 1.0);
        assert_relative_eq!(julian_centuries(J2000 - 36_525.0), -1.0);
    }

    #[test]
    fn test_calendar_tuple_display() {
        let cal = CalendarTuple::new(2019, 12, 22, 12, 19, 18.0);
        assert_eq!(cal.to_string(), "2019-12-22 12:19:18");
        assert_eq!(CalendarTuple::from((2020, 3, 5)).to_string(), "2020-03-05 00:00:00");
    }

    #[test]
    fn test_naive_conversions() {
        let cal = CalendarTuple::new(2021, 6, 21, 11, 32, 7.25);
        let naive = cal.to_naive().unwrap();
        assert_eq!(naive.to_string(), "2021-06-21 11:32:07.250");
        assert_eq!(CalendarTuple::from(naive), cal);

        let converted: Result<NaiveDateTime> = CalendarTuple::date(1500, 3, 1).try_into();
        assert!(converted.is_err());
        assert!(CalendarTuple::date(2021, 2, 30).to_naive().is_err());
    }

    #[test]
    fn test_default_offset_is_china_standard_time() {
        let ts = Timescale::default();
        assert_eq!(ts.utc_offset().local_minus_utc(), 8 * 3600);
        assert_eq!(ts.delta_t(), &DeltaT::default());
    }

    #[test]
    fn test_tt_to_utc_at_j2000() {
        let ts = Timescale::default();
        assert_abs_diff_eq!(ts.tt_to_utc(J2000).unwrap(), J2000 - 63.87 / DAY_S, epsilon = 1e-12);
    }

    #[test]
    fn test_utc_tt_round_trip() {
        let ts = Timescale::default();
        for jd_utc in [2_415_020.5, 2_451_544.5, 2_458_849.5, 2_488_069.5] {
            let jd_tt = ts.utc_to_tt(jd_utc).unwrap();
            assert_abs_diff_eq!(ts.tt_to_utc(jd_tt).unwrap(), jd_utc, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_local_offset() {
        let ts = Timescale::default();
        assert_abs_diff_eq!(ts.utc_to_local(J2000), J2000 + 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ts.local_to_utc(ts.utc_to_local(J2000)), J2000, epsilon = 1e-12);
    }

    #[test]
    fn test_civil_datetime() {
        // 2000-01-01 12:00:00 TT is 11:58:56.13 UTC, 19:58:56 in UTC+8
        let ts = Timescale::default();
        let dt = ts.civil_datetime(J2000).unwrap();
        assert_eq!(dt.to_rfc3339(), "2000-01-01T19:58:56+08:00");

        let utc = Timescale::new(DeltaT::default(), utc_offset_from_seconds(0).unwrap());
        assert_eq!(
            utc.civil_datetime(J2000).unwrap().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2000-01-01 11:58:56"
        );
    }

    #[test]
    fn test_tt_from_civil() {
        let ts = Timescale::default();
        let local = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let expected = J2000 + 63.87 / DAY_S;
        assert_abs_diff_eq!(ts.tt_from_civil(&local).unwrap(), expected, epsilon = 1e-8);
    }

    #[test]
    fn test_offset_range() {
        assert!(utc_offset_from_seconds(-5 * 3600).is_ok());
        assert!(utc_offset_from_seconds(86_400).is_err());
    }
}
