//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Days in a Julian millennium, the time unit of the VSOP87 series
pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365_250.0;
/// Mean Gregorian year in days, used to turn a Julian date into a decimal year
pub const DAYS_PER_GREGORIAN_YEAR: f64 = 365.2425;

// Angles
/// Arcseconds in one degree
pub const ASEC_PER_DEG: f64 = 3_600.0;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;

// Solar position
/// Constant of annual aberration for the Sun, arcseconds at 1 AU
pub const SOLAR_ABERRATION_ASEC: f64 = 20.4898;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i64 = 2_299_161;
/// First day of Gregorian calendar as (year, month, day)
pub const GREGORIAN_START_DATE: (i32, u32, u32) = (1582, 10, 15);
/// Last day of the Julian calendar as (year, month, day)
pub const JULIAN_END_DATE: (i32, u32, u32) = (1582, 10, 4);

// Civil time
/// Default civil zone offset in seconds east of UTC (China Standard Time, UTC+8)
pub const DEFAULT_UTC_OFFSET_S: i32 = 8 * 3_600;
