//! Nutation in longitude and obliquity
//!
//! IAU 1980 theory truncated to the 63 periodic terms tabulated by Meeus,
//! *Astronomical Algorithms*, chapter 22. Arguments are combinations of the
//! Delaunay-style fundamental arguments D, M, M', F and Omega.

use crate::constants::{ASEC_PER_DEG, DEG2RAD};

/// Scale of the tabulated amplitudes, 0.0001 arcsecond
const AMPLITUDE_ASEC: f64 = 1e-4;

/// One row of the nutation table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationTerm {
    /// Multipliers of (D, M, M', F, Omega)
    pub multipliers: [i8; 5],
    /// Sine coefficients for longitude, constant and per century
    pub longitude: [f64; 2],
    /// Cosine coefficients for obliquity, constant and per century
    pub obliquity: [f64; 2],
}

const fn nt(multipliers: [i8; 5], longitude: [f64; 2], obliquity: [f64; 2]) -> NutationTerm {
    NutationTerm {
        multipliers,
        longitude,
        obliquity,
    }
}

/// Fundamental arguments in degrees, not reduced to a single turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalArguments {
    /// Mean elongation of the Moon from the Sun
    pub d: f64,
    /// Mean anomaly of the Sun
    pub m: f64,
    /// Mean anomaly of the Moon
    pub m_prime: f64,
    /// Moon's argument of latitude
    pub f: f64,
    /// Longitude of the ascending node of the Moon's mean orbit
    pub omega: f64,
}

impl FundamentalArguments {
    fn as_array(&self) -> [f64; 5] {
        [self.d, self.m, self.m_prime, self.f, self.omega]
    }

    /// Argument of one table row, in radians
    pub fn argument(&self, term: &NutationTerm) -> f64 {
        term.multipliers
            .iter()
            .zip(self.as_array())
            .map(|(&k, value)| k as f64 * value)
            .sum::<f64>()
            * DEG2RAD
    }
}

/// Fundamental arguments at `t_centuries` Julian centuries of TT from J2000
pub fn fundamental_arguments(t_centuries: f64) -> FundamentalArguments {
    let t = t_centuries;
    let t2 = t * t;
    let t3 = t2 * t;

    FundamentalArguments {
        d: 297.85036 + 445_267.111480 * t - 0.0019142 * t2 + t3 / 189_474.0,
        m: 357.52772 + 35_999.050340 * t - 0.0001603 * t2 - t3 / 300_000.0,
        m_prime: 134.96298 + 477_198.867398 * t + 0.0086972 * t2 + t3 / 56_250.0,
        f: 93.27191 + 483_202.017538 * t - 0.0036825 * t2 + t3 / 327_270.0,
        omega: 125.04452 - 1_934.136261 * t + 0.0020708 * t2 + t3 / 450_000.0,
    }
}

/// The nutation series
pub fn nutation_table() -> &'static [NutationTerm] {
    &NUTATION_TERMS
}

/// Nutation in longitude, in degrees, at `t` Julian millennia of TT from J2000
pub fn nutation_in_longitude(t: f64) -> f64 {
    let centuries = t * 10.0;
    let args = fundamental_arguments(centuries);
    let sum: f64 = NUTATION_TERMS
        .iter()
        .map(|term| (term.longitude[0] + term.longitude[1] * centuries) * args.argument(term).sin())
        .sum();
    sum * AMPLITUDE_ASEC / ASEC_PER_DEG
}

/// Nutation in obliquity, in degrees, at `t` Julian millennia of TT from J2000
pub fn nutation_in_obliquity(t: f64) -> f64 {
    let centuries = t * 10.0;
    let args = fundamental_arguments(centuries);
    let sum: f64 = NUTATION_TERMS
        .iter()
        .map(|term| (term.obliquity[0] + term.obliquity[1] * centuries) * args.argument(term).cos())
        .sum();
    sum * AMPLITUDE_ASEC / ASEC_PER_DEG
}

#[rustfmt::skip]
static NUTATION_TERMS: [NutationTerm; 63] = [
    nt([ 0,  0,  0,  0,  1], [-171996.0, -174.2], [92025.0, 8.9]),
    nt([-2,  0,  0,  2,  2], [-13187.0, -1.6], [5736.0, -3.1]),
    nt([ 0,  0,  0,  2,  2], [-2274.0, -0.2], [977.0, -0.5]),
    nt([ 0,  0,  0,  0,  2], [2062.0, 0.2], [-895.0, 0.5]),
    nt([ 0,  1,  0,  0,  0], [1426.0, -3.4], [54.0, -0.1]),
    nt([ 0,  0,  1,  0,  0], [712.0, 0.1], [-7.0, 0.0]),
    nt([-2,  1,  0,  2,  2], [-517.0, 1.2], [224.0, -0.6]),
    nt([ 0,  0,  0,  2,  1], [-386.0, -0.4], [200.0, 0.0]),
    nt([ 0,  0,  1,  2,  2], [-301.0, 0.0], [129.0, -0.1]),
    nt([-2, -1,  0,  2,  2], [217.0, -0.5], [-95.0, 0.3]),
    nt([-2,  0,  1,  0,  0], [-158.0, 0.0], [0.0, 0.0]),
    nt([-2,  0,  0,  2,  1], [129.0, 0.1], [-70.0, 0.0]),
    nt([ 0,  0, -1,  2,  2], [123.0, 0.0], [-53.0, 0.0]),
    nt([ 2,  0,  0,  0,  0], [63.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0,  1,  0,  1], [63.0, 0.1], [-33.0, 0.0]),
    nt([ 2,  0, -1,  2,  2], [-59.0, 0.0], [26.0, 0.0]),
    nt([ 0,  0, -1,  0,  1], [-58.0, -0.1], [32.0, 0.0]),
    nt([ 0,  0,  1,  2,  1], [-51.0, 0.0], [27.0, 0.0]),
    nt([-2,  0,  2,  0,  0], [48.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0, -2,  2,  1], [46.0, 0.0], [-24.0, 0.0]),
    nt([ 2,  0,  0,  2,  2], [-38.0, 0.0], [16.0, 0.0]),
    nt([ 0,  0,  2,  2,  2], [-31.0, 0.0], [13.0, 0.0]),
    nt([ 0,  0,  2,  0,  0], [29.0, 0.0], [0.0, 0.0]),
    nt([-2,  0,  1,  2,  2], [29.0, 0.0], [-12.0, 0.0]),
    nt([ 0,  0,  0,  2,  0], [26.0, 0.0], [0.0, 0.0]),
    nt([-2,  0,  0,  2,  0], [-22.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0, -1,  2,  1], [21.0, 0.0], [-10.0, 0.0]),
    nt([ 0,  2,  0,  0,  0], [17.0, -0.1], [0.0, 0.0]),
    nt([ 2,  0, -1,  0,  1], [16.0, 0.0], [-8.0, 0.0]),
    nt([-2,  2,  0,  2,  2], [-16.0, 0.1], [7.0, 0.0]),
    nt([ 0,  1,  0,  0,  1], [-15.0, 0.0], [9.0, 0.0]),
    nt([-2,  0,  1,  0,  1], [-13.0, 0.0], [7.0, 0.0]),
    nt([ 0, -1,  0,  0,  1], [-12.0, 0.0], [6.0, 0.0]),
    nt([ 0,  0,  2, -2,  0], [11.0, 0.0], [0.0, 0.0]),
    nt([ 2,  0, -1,  2,  1], [-10.0, 0.0], [5.0, 0.0]),
    nt([ 2,  0,  1,  2,  2], [-8.0, 0.0], [3.0, 0.0]),
    nt([ 0,  1,  0,  2,  2], [7.0, 0.0], [-3.0, 0.0]),
    nt([-2,  1,  1,  0,  0], [-7.0, 0.0], [0.0, 0.0]),
    nt([ 0, -1,  0,  2,  2], [-7.0, 0.0], [3.0, 0.0]),
    nt([ 2,  0,  0,  2,  1], [-7.0, 0.0], [3.0, 0.0]),
    nt([ 2,  0,  1,  0,  0], [6.0, 0.0], [0.0, 0.0]),
    nt([-2,  0,  2,  2,  2], [6.0, 0.0], [-3.0, 0.0]),
    nt([-2,  0,  1,  2,  1], [6.0, 0.0], [-3.0, 0.0]),
    nt([ 2,  0, -2,  0,  1], [-6.0, 0.0], [3.0, 0.0]),
    nt([ 2,  0,  0,  0,  1], [-6.0, 0.0], [3.0, 0.0]),
    nt([ 0, -1,  1,  0,  0], [5.0, 0.0], [0.0, 0.0]),
    nt([-2, -1,  0,  2,  1], [-5.0, 0.0], [3.0, 0.0]),
    nt([-2,  0,  0,  0,  1], [-5.0, 0.0], [3.0, 0.0]),
    nt([ 0,  0,  2,  2,  1], [-5.0, 0.0], [3.0, 0.0]),
    nt([-2,  0,  2,  0,  1], [4.0, 0.0], [0.0, 0.0]),
    nt([-2,  1,  0,  2,  1], [4.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0,  1, -2,  0], [4.0, 0.0], [0.0, 0.0]),
    nt([-1,  0,  1,  0,  0], [-4.0, 0.0], [0.0, 0.0]),
    nt([-2,  1,  0,  0,  0], [-4.0, 0.0], [0.0, 0.0]),
    nt([ 1,  0,  0,  0,  0], [-4.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0,  1,  2,  0], [3.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0, -2,  2,  2], [-3.0, 0.0], [0.0, 0.0]),
    nt([-1, -1,  1,  0,  0], [-3.0, 0.0], [0.0, 0.0]),
    nt([ 0,  1,  1,  0,  0], [-3.0, 0.0], [0.0, 0.0]),
    nt([ 0, -1,  1,  2,  2], [-3.0, 0.0], [0.0, 0.0]),
    nt([ 2, -1, -1,  2,  2], [-3.0, 0.0], [0.0, 0.0]),
    nt([ 0,  0,  3,  2,  2], [-3.0, 0.0], [0.0, 0.0]),
    nt([ 2, -1,  0,  2,  2], [-3.0, 0.0], [0.0, 0.0]),
];
