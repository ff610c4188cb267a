//! Delta-T (TT - UT) model
//!
//! Years before 2005 are interpolated from a table of cubic segments
//! reaching back to -4000. From 2005 the model grows linearly up to a pivot
//! year and then follows the long-term parabola `-20 + k * ((year - 1820) / 100)^2`.
//! For a century after the pivot the parabola is pulled down by a linearly
//! shrinking share of its offset from the straight line, so the two pieces
//! join without a step.

use super::{Result, TimeError};
use crate::constants::{DAYS_PER_GREGORIAN_YEAR, J2000};
use serde::{Deserialize, Serialize};

/// Parabola acceleration used by the Swiss Ephemeris (seconds per century squared)
pub const SWISS_EPHEMERIS_ACCELERATION: f64 = 31.0;
/// Parabola acceleration published by NASA
pub const NASA_ACCELERATION: f64 = 32.0;
/// Parabola acceleration used by skmap
pub const SKYMAP_ACCELERATION: f64 = 29.0;

/// First year handled by the extrapolation instead of the table
const TABLE_END_YEAR: f64 = 2005.0;
/// Years over which the parabola is blended into the linear segment
const BLEND_SPAN_YEARS: f64 = 100.0;

/// One boundary of the historical table
///
/// Between `year` and the next row's year, ΔT is the cubic in
/// `t = 10 * (y - year) / (next.year - year)` with the given coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaTRow {
    pub year: f64,
    pub coefficients: [f64; 4],
}

const fn row(year: f64, c0: f64, c1: f64, c2: f64, c3: f64) -> DeltaTRow {
    DeltaTRow {
        year,
        coefficients: [c0, c1, c2, c3],
    }
}

#[rustfmt::skip]
static DELTA_T_TABLE: [DeltaTRow; 20] = [
    row(-4000.0, 108371.7, -13036.80,  392.000,  0.0000),
    row( -500.0,  17201.0,   -627.82,   16.170, -0.3413),
    row( -150.0,  12200.6,   -346.41,    5.403, -0.1593),
    row(  150.0,   9113.8,   -328.13,   -1.647,  0.0377),
    row(  500.0,   5707.5,   -391.41,    0.915,  0.3145),
    row(  900.0,   2203.4,   -283.45,   13.034, -0.1778),
    row( 1300.0,    490.1,    -57.35,    2.085, -0.0072),
    row( 1600.0,    120.0,     -9.81,   -1.532,  0.1403),
    row( 1700.0,     10.2,     -0.91,    0.510, -0.0370),
    row( 1800.0,     13.4,     -0.72,    0.202, -0.0193),
    row( 1830.0,      7.8,     -1.81,    0.416, -0.0247),
    row( 1860.0,      8.3,     -0.13,   -0.406,  0.0292),
    row( 1880.0,     -5.4,      0.32,   -0.183,  0.0173),
    row( 1900.0,     -2.3,      2.06,    0.169, -0.0135),
    row( 1920.0,     21.2,      1.69,   -0.304,  0.0167),
    row( 1940.0,     24.2,      1.22,   -0.064,  0.0031),
    row( 1960.0,     33.2,      0.51,    0.231, -0.0109),
    row( 1980.0,     51.0,      1.29,   -0.026,  0.0032),
    row( 2000.0,     63.87,     0.1,     0.0,    0.0),
    row( 2005.0,      0.0,      0.0,     0.0,    0.0),
];

/// The rows of the historical ΔT table
pub fn delta_t_table() -> &'static [DeltaTRow] {
    &DELTA_T_TABLE
}

/// Parameters of the ΔT model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaT {
    /// ΔT in seconds at the start of 2005, where the table ends
    pub base_value: f64,
    /// Linear growth after 2005, seconds per year
    pub linear_rate: f64,
    /// Year at which the linear segment hands over to the parabola
    pub pivot_year: f64,
    /// Parabola coefficient `k`, seconds per century squared
    pub acceleration: f64,
}

impl Default for DeltaT {
    fn default() -> Self {
        Self {
            base_value: 64.7,
            linear_rate: 0.4,
            pivot_year: 2014.0,
            acceleration: SWISS_EPHEMERIS_ACCELERATION,
        }
    }
}

impl DeltaT {
    /// Default model with a different parabola acceleration
    pub fn with_acceleration(acceleration: f64) -> Self {
        Self {
            acceleration,
            ..Self::default()
        }
    }

    /// ΔT in seconds for a decimal year
    pub fn delta_t(&self, year: f64) -> Result<f64> {
        if !year.is_finite() {
            return Err(TimeError::DeltaTOutOfRange { year });
        }

        if year >= TABLE_END_YEAR {
            Ok(self.extrapolate(year))
        } else {
            interpolate_table(year)
        }
    }

    /// ΔT in seconds at a Terrestrial Time Julian date
    pub fn delta_t_for_jd(&self, jd_tt: f64) -> Result<f64> {
        self.delta_t(jd_to_decimal_year(jd_tt))
    }

    fn linear(&self, year: f64) -> f64 {
        self.base_value + (year - TABLE_END_YEAR) * self.linear_rate
    }

    fn parabola(&self, year: f64) -> f64 {
        let centuries = (year - 1820.0) / 100.0;
        -20.0 + self.acceleration * centuries * centuries
    }

    fn extrapolate(&self, year: f64) -> f64 {
        if year <= self.pivot_year {
            return self.linear(year);
        }

        let mut value = self.parabola(year);
        let gap = self.parabola(self.pivot_year) - self.linear(self.pivot_year);
        let blend_end = self.pivot_year + BLEND_SPAN_YEARS;
        if year < blend_end {
            value -= gap * (blend_end - year) / BLEND_SPAN_YEARS;
        }
        value
    }
}

/// Decimal year of a Julian date, counted in mean Gregorian years from J2000
pub fn jd_to_decimal_year(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_GREGORIAN_YEAR + 2000.0
}

fn interpolate_table(year: f64) -> Result<f64> {
    let index = DELTA_T_TABLE
        .windows(2)
        .position(|pair| pair[0].year <= year && year < pair[1].year)
        .ok_or(TimeError::DeltaTOutOfRange { year })?;

    let lower = &DELTA_T_TABLE[index];
    let upper = &DELTA_T_TABLE[index + 1];
    let t = (year - lower.year) / (upper.year - lower.year) * 10.0;
    let [c0, c1, c2, c3] = lower.coefficients;

    Ok(c0 + c1 * t + c2 * t * t + c3 * t * t * t)
}
