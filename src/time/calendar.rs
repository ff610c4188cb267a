//! Calendar date and Julian date conversion functions
//!
//! This module converts between civil calendar tuples and continuous Julian
//! dates. Dates on or after 1582-10-15 are read in the Gregorian calendar,
//! earlier dates in the proleptic Julian calendar; the ten days skipped by the
//! reform do not exist.

use super::{CalendarTuple, Result, TimeError};
use crate::constants::{DAY_S, GREGORIAN_START, GREGORIAN_START_DATE, JULIAN_END_DATE};

/// Whether a civil date falls on or after the Gregorian reform
pub fn is_gregorian_date(year: i32, month: u32, day: u32) -> bool {
    (year, month, day) >= GREGORIAN_START_DATE
}

/// Leap-year rule of whichever calendar was in force during `year`
pub fn is_leap_year(year: i32) -> bool {
    if year > GREGORIAN_START_DATE.0 {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

/// Number of days in a month, `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

fn validate(cal: &CalendarTuple) -> Result<()> {
    let month_length = days_in_month(cal.year, cal.month)
        .ok_or_else(|| TimeError::CalendarError(format!("month {} out of range", cal.month)))?;

    if cal.day == 0 || cal.day > month_length {
        return Err(TimeError::CalendarError(format!(
            "day {} out of range for {:04}-{:02}",
            cal.day, cal.year, cal.month
        )));
    }

    let date = (cal.year, cal.month, cal.day);
    if date > JULIAN_END_DATE && date < GREGORIAN_START_DATE {
        return Err(TimeError::CalendarError(format!(
            "{:04}-{:02}-{:02} was skipped by the Gregorian reform",
            cal.year, cal.month, cal.day
        )));
    }

    if cal.hour >= 24 || cal.minute >= 60 {
        return Err(TimeError::CalendarError(format!(
            "time {:02}:{:02} out of range",
            cal.hour, cal.minute
        )));
    }

    if !cal.second.is_finite() || !(0.0..60.0).contains(&cal.second) {
        return Err(TimeError::CalendarError(format!(
            "second {} out of range",
            cal.second
        )));
    }

    Ok(())
}

/// Convert a civil calendar tuple to a Julian date
///
/// January and February count as months 13 and 14 of the previous year; the
/// Gregorian correction `2 - A + A/4` applies from 1582-10-15 onwards.
pub fn calendar_to_jd(cal: &CalendarTuple) -> Result<f64> {
    validate(cal)?;

    let gregorian = is_gregorian_date(cal.year, cal.month, cal.day);
    let (year, month) = if cal.month <= 2 {
        (cal.year as f64 - 1.0, cal.month as f64 + 12.0)
    } else {
        (cal.year as f64, cal.month as f64)
    };

    let correction = if gregorian {
        let century = (year / 100.0).floor();
        2.0 - century + (century / 4.0).floor()
    } else {
        0.0
    };

    let day_fraction = (cal.hour as f64 + cal.minute as f64 / 60.0 + cal.second / 3600.0) / 24.0;

    Ok((365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor()
        + cal.day as f64
        + correction
        - 1524.5
        + day_fraction)
}

/// Convert a Julian day number (days since the civil midnight of JD 0) to a date
fn day_number_to_date(day_number: i64) -> (i32, u32, u32) {
    let z = day_number as f64;
    let a = if day_number >= GREGORIAN_START {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day as u32)
}

/// Convert a Julian date to a civil calendar tuple
///
/// The instant is rounded to the nearest whole second before it is split into
/// date and time of day, so a rounding carry moves into the minute, hour, day
/// and beyond and `second` is never 60. Years use astronomical numbering.
pub fn jd_to_calendar(jd: f64) -> CalendarTuple {
    let total_seconds = ((jd + 0.5) * DAY_S).round() as i64;
    let seconds_per_day = DAY_S as i64;
    let day_number = total_seconds.div_euclid(seconds_per_day);
    let seconds_of_day = total_seconds.rem_euclid(seconds_per_day);

    let (year, month, day) = day_number_to_date(day_number);

    CalendarTuple {
        year,
        month,
        day,
        hour: (seconds_of_day / 3600) as u32,
        minute: (seconds_of_day % 3600 / 60) as u32,
        second: (seconds_of_day % 60) as f64,
    }
}
