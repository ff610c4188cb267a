//! Truncated VSOP87 series for the Earth
//!
//! Heliocentric ecliptic coordinates of the Earth referred to the mean
//! equinox of date, from the abridged VSOP87D tables in Meeus, *Astronomical
//! Algorithms*, appendix III. Each coordinate is a polynomial in the time `t`
//! (Julian millennia of TT from J2000) whose coefficients are sums of periodic
//! terms `A cos(B + C t)`. Amplitudes are stored in units of 1e-8 radian (or
//! 1e-8 AU for the radius vector).

use crate::time::julian_millennia;

/// Scale of the stored amplitudes
const AMPLITUDE_SCALE: f64 = 1e8;

/// One term `A cos(B + C t)` of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicTerm {
    /// Amplitude in 1e-8 rad or 1e-8 AU
    pub amplitude: f64,
    /// Phase in radians
    pub phase: f64,
    /// Frequency in radians per Julian millennium
    pub frequency: f64,
}

const fn pt(amplitude: f64, phase: f64, frequency: f64) -> PeriodicTerm {
    PeriodicTerm {
        amplitude,
        phase,
        frequency,
    }
}

/// Heliocentric ecliptic position of the Earth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricPosition {
    /// Longitude in radians, not reduced
    pub longitude: f64,
    /// Latitude in radians
    pub latitude: f64,
    /// Radius vector in AU
    pub radius: f64,
}

/// Sum of one series at time `t`
pub fn evaluate(series: &[PeriodicTerm], t: f64) -> f64 {
    series
        .iter()
        .map(|term| term.amplitude * (term.phase + term.frequency * t).cos())
        .sum()
}

/// Polynomial in `t` whose k-th coefficient is the sum of `orders[k]`
///
/// Evaluated by Horner's rule and rescaled from the stored amplitude units.
pub fn evaluate_orders(orders: &[&[PeriodicTerm]], t: f64) -> f64 {
    orders
        .iter()
        .rev()
        .fold(0.0, |acc, series| acc * t + evaluate(series, t))
        / AMPLITUDE_SCALE
}

/// Longitude series L0..L5
pub static EARTH_LONGITUDE: [&[PeriodicTerm]; 6] =
    [&EARTH_L0, &EARTH_L1, &EARTH_L2, &EARTH_L3, &EARTH_L4, &EARTH_L5];

/// Latitude series B0..B4
pub static EARTH_LATITUDE: [&[PeriodicTerm]; 5] =
    [&EARTH_B0, &EARTH_B1, &EARTH_B2, &EARTH_B3, &EARTH_B4];

/// Radius series R0..R4
pub static EARTH_RADIUS: [&[PeriodicTerm]; 5] =
    [&EARTH_R0, &EARTH_R1, &EARTH_R2, &EARTH_R3, &EARTH_R4];

/// Heliocentric position of the Earth at `t` Julian millennia from J2000
pub fn earth_heliocentric(t: f64) -> HeliocentricPosition {
    HeliocentricPosition {
        longitude: evaluate_orders(&EARTH_LONGITUDE, t),
        latitude: evaluate_orders(&EARTH_LATITUDE, t),
        radius: evaluate_orders(&EARTH_RADIUS, t),
    }
}

/// Heliocentric position of the Earth at a TT Julian date
pub fn earth_heliocentric_at(jd_tt: f64) -> HeliocentricPosition {
    earth_heliocentric(julian_millennia(jd_tt))
}

#[rustfmt::skip]
static EARTH_L0: [PeriodicTerm; 64] = [
    pt(175347046.0, 0.0, 0.0),
    pt(3341656.0, 4.6692568, 6283.07585),
    pt(34894.0, 4.6261, 12566.1517),
    pt(3497.0, 2.7441, 5753.3849),
    pt(3418.0, 2.8289, 3.5231),
    pt(3136.0, 3.6277, 77713.7715),
    pt(2676.0, 4.4181, 7860.4194),
    pt(2343.0, 6.1352, 3930.2097),
    pt(1324.0, 0.7425, 11506.7698),
    pt(1273.0, 2.0371, 529.691),
    pt(1799.0, 1.1096, 1577.3435),
    pt(990.0, 5.233, 5884.927),
    pt(902.0, 2.045, 26.298),
    pt(857.0, 3.508, 398.149),
    pt(780.0, 1.179, 5223.694),
    pt(753.0, 2.533, 5507.553),
    pt(505.0, 4.583, 18849.228),
    pt(492.0, 4.205, 775.523),
    pt(357.0, 2.92, 0.067),
    pt(317.0, 5.849, 11790.629),
    pt(284.0, 1.899, 796.298),
    pt(271.0, 0.315, 10977.079),
    pt(243.0, 0.345, 5486.778),
    pt(206.0, 4.806, 2544.314),
    pt(205.0, 1.869, 5573.143),
    pt(202.0, 2.458, 6069.777),
    pt(156.0, 0.833, 213.299),
    pt(132.0, 3.411, 2942.463),
    pt(126.0, 1.083, 20.775),
    pt(119.0, 0.645, 0.98),
    pt(107.0, 0.636, 4694.003),
    pt(102.0, 0.976, 15720.839),
    pt(102.0, 4.267, 7.114),
    pt(99.0, 6.21, 2146.17),
    pt(98.0, 0.68, 155.42),
    pt(86.0, 5.98, 161000.69),
    pt(85.0, 1.3, 6275.96),
    pt(85.0, 3.67, 71430.7),
    pt(80.0, 1.81, 17260.15),
    pt(79.0, 3.04, 12036.46),
    pt(75.0, 1.76, 5088.63),
    pt(74.0, 3.5, 3154.69),
    pt(74.0, 4.68, 801.82),
    pt(70.0, 0.83, 9437.76),
    pt(62.0, 3.98, 8827.39),
    pt(61.0, 1.82, 7084.9),
    pt(57.0, 2.78, 6286.6),
    pt(56.0, 4.39, 14143.5),
    pt(56.0, 3.47, 6279.55),
    pt(52.0, 0.19, 12139.55),
    pt(52.0, 1.33, 1748.02),
    pt(51.0, 0.28, 5856.48),
    pt(49.0, 0.49, 1194.45),
    pt(41.0, 5.37, 8429.24),
    pt(41.0, 2.4, 19651.05),
    pt(39.0, 6.17, 10447.39),
    pt(37.0, 6.04, 10213.29),
    pt(37.0, 2.57, 1059.38),
    pt(36.0, 1.71, 2352.87),
    pt(36.0, 1.78, 6812.77),
    pt(33.0, 0.59, 17789.85),
    pt(30.0, 0.44, 83996.85),
    pt(30.0, 2.74, 1349.87),
    pt(25.0, 3.16, 4690.48),
];

#[rustfmt::skip]
static EARTH_L1: [PeriodicTerm; 34] = [
    pt(628331966747.0, 0.0, 0.0),
    pt(206059.0, 2.678235, 6283.07585),
    pt(4303.0, 2.6351, 12566.1517),
    pt(425.0, 1.59, 3.523),
    pt(119.0, 5.796, 26.298),
    pt(109.0, 2.966, 1577.344),
    pt(93.0, 2.59, 18849.23),
    pt(72.0, 1.14, 529.69),
    pt(68.0, 1.87, 398.15),
    pt(67.0, 4.41, 5507.55),
    pt(59.0, 2.89, 5223.69),
    pt(56.0, 2.17, 155.42),
    pt(45.0, 0.4, 796.3),
    pt(36.0, 0.47, 775.52),
    pt(29.0, 2.65, 7.11),
    pt(21.0, 5.34, 0.98),
    pt(19.0, 1.85, 5486.78),
    pt(19.0, 4.97, 213.3),
    pt(17.0, 2.99, 6275.96),
    pt(16.0, 0.03, 2544.31),
    pt(16.0, 1.43, 2146.17),
    pt(15.0, 1.21, 10977.08),
    pt(12.0, 2.83, 1748.02),
    pt(12.0, 3.26, 5088.63),
    pt(12.0, 5.27, 1194.45),
    pt(12.0, 2.08, 4694.0),
    pt(11.0, 0.77, 553.57),
    pt(10.0, 1.3, 6286.6),
    pt(10.0, 4.24, 1349.87),
    pt(9.0, 2.7, 242.73),
    pt(9.0, 5.64, 951.72),
    pt(8.0, 5.3, 2352.87),
    pt(6.0, 2.65, 9437.76),
    pt(6.0, 4.67, 4690.48),
];

#[rustfmt::skip]
static EARTH_L2: [PeriodicTerm; 20] = [
    pt(52919.0, 0.0, 0.0),
    pt(8720.0, 1.0721, 6283.0758),
    pt(309.0, 0.867, 12566.152),
    pt(27.0, 0.05, 3.52),
    pt(16.0, 5.19, 26.3),
    pt(16.0, 3.68, 155.42),
    pt(10.0, 0.76, 18849.23),
    pt(9.0, 2.06, 77713.77),
    pt(7.0, 0.83, 775.52),
    pt(5.0, 4.66, 1577.34),
    pt(4.0, 1.03, 7.11),
    pt(4.0, 3.44, 5573.14),
    pt(3.0, 5.14, 796.3),
    pt(3.0, 6.05, 5507.55),
    pt(3.0, 1.19, 242.73),
    pt(3.0, 6.12, 529.69),
    pt(3.0, 0.31, 398.15),
    pt(3.0, 2.28, 553.57),
    pt(2.0, 4.38, 5223.69),
    pt(2.0, 3.75, 0.98),
];

#[rustfmt::skip]
static EARTH_L3: [PeriodicTerm; 7] = [
    pt(289.0, 5.844, 6283.076),
    pt(35.0, 0.0, 0.0),
    pt(17.0, 5.49, 12566.15),
    pt(3.0, 5.2, 155.42),
    pt(1.0, 4.72, 3.52),
    pt(1.0, 5.3, 18849.23),
    pt(1.0, 5.97, 242.73),
];

#[rustfmt::skip]
static EARTH_L4: [PeriodicTerm; 3] = [
    pt(114.0, 3.142, 0.0),
    pt(8.0, 4.13, 6283.08),
    pt(1.0, 3.84, 12566.15),
];

#[rustfmt::skip]
static EARTH_L5: [PeriodicTerm; 1] = [
    pt(1.0, 3.14, 0.0),
];

#[rustfmt::skip]
static EARTH_B0: [PeriodicTerm; 5] = [
    pt(280.0, 3.199, 84334.662),
    pt(102.0, 5.422, 5507.553),
    pt(80.0, 3.88, 5223.69),
    pt(44.0, 3.7, 2352.87),
    pt(32.0, 4.0, 1577.34),
];

#[rustfmt::skip]
static EARTH_B1: [PeriodicTerm; 2] = [
    pt(9.0, 3.9, 5507.55),
    pt(6.0, 1.73, 5223.69),
];

#[rustfmt::skip]
static EARTH_B2: [PeriodicTerm; 4] = [
    pt(22378.0, 3.38509, 10213.28555),
    pt(282.0, 0.0, 0.0),
    pt(173.0, 5.256, 20426.571),
    pt(27.0, 3.87, 30639.86),
];

#[rustfmt::skip]
static EARTH_B3: [PeriodicTerm; 4] = [
    pt(647.0, 4.992, 10213.286),
    pt(20.0, 3.14, 0.0),
    pt(6.0, 0.77, 20426.57),
    pt(3.0, 5.44, 30639.86),
];

#[rustfmt::skip]
static EARTH_B4: [PeriodicTerm; 1] = [
    pt(14.0, 0.32, 10213.29),
];

#[rustfmt::skip]
static EARTH_R0: [PeriodicTerm; 40] = [
    pt(100013989.0, 0.0, 0.0),
    pt(1670700.0, 3.0984635, 6283.07585),
    pt(13956.0, 3.05525, 12566.1517),
    pt(3084.0, 5.1985, 77713.7715),
    pt(1628.0, 1.1739, 5753.3849),
    pt(1576.0, 2.8469, 7860.4194),
    pt(925.0, 5.453, 11506.77),
    pt(542.0, 4.564, 3930.21),
    pt(472.0, 3.661, 5884.927),
    pt(346.0, 0.964, 5507.553),
    pt(329.0, 5.9, 5223.694),
    pt(307.0, 0.299, 5573.143),
    pt(243.0, 4.273, 11790.629),
    pt(212.0, 5.847, 1577.344),
    pt(186.0, 5.022, 10977.079),
    pt(175.0, 3.012, 18849.228),
    pt(110.0, 5.055, 5486.778),
    pt(98.0, 0.89, 6069.78),
    pt(86.0, 5.69, 15720.84),
    pt(86.0, 1.27, 161000.69),
    pt(65.0, 0.27, 17260.15),
    pt(63.0, 0.92, 529.69),
    pt(57.0, 2.01, 83996.85),
    pt(56.0, 5.24, 71430.7),
    pt(49.0, 3.25, 2544.31),
    pt(47.0, 2.58, 775.52),
    pt(45.0, 5.54, 9437.76),
    pt(43.0, 6.01, 6275.96),
    pt(39.0, 5.36, 4694.0),
    pt(38.0, 2.39, 8827.39),
    pt(37.0, 0.83, 19651.05),
    pt(37.0, 4.9, 12139.55),
    pt(36.0, 1.67, 12036.46),
    pt(35.0, 1.84, 2942.46),
    pt(33.0, 0.24, 7084.9),
    pt(32.0, 0.18, 5088.63),
    pt(32.0, 1.78, 398.15),
    pt(28.0, 1.21, 6286.6),
    pt(28.0, 1.9, 6279.55),
    pt(26.0, 4.59, 10447.39),
];

#[rustfmt::skip]
static EARTH_R1: [PeriodicTerm; 10] = [
    pt(103019.0, 1.10749, 6283.07585),
    pt(1721.0, 1.0644, 12566.1517),
    pt(702.0, 3.142, 0.0),
    pt(32.0, 1.02, 18849.23),
    pt(31.0, 2.84, 5507.55),
    pt(25.0, 1.32, 5223.69),
    pt(18.0, 1.42, 1577.34),
    pt(10.0, 5.91, 10977.08),
    pt(9.0, 1.42, 6275.96),
    pt(9.0, 0.27, 5486.78),
];

#[rustfmt::skip]
static EARTH_R2: [PeriodicTerm; 6] = [
    pt(4359.0, 5.7846, 6283.0758),
    pt(124.0, 5.579, 12566.152),
    pt(12.0, 3.14, 0.0),
    pt(9.0, 3.63, 77713.77),
    pt(6.0, 1.87, 5573.14),
    pt(3.0, 5.47, 18849.23),
];

#[rustfmt::skip]
static EARTH_R3: [PeriodicTerm; 2] = [
    pt(145.0, 4.273, 6283.076),
    pt(7.0, 3.92, 12566.15),
];

#[rustfmt::skip]
static EARTH_R4: [PeriodicTerm; 1] = [
    pt(4.0, 2.56, 6283.08),
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_series_lengths() {
        let lengths: Vec<usize> = EARTH_LONGITUDE.iter().map(|s| s.len()).collect();
        assert_eq!(lengths, vec![64, 34, 20, 7, 3, 1]);
        let lengths: Vec<usize> = EARTH_LATITUDE.iter().map(|s| s.len()).collect();
        assert_eq!(lengths, vec![5, 2, 4, 4, 1]);
        let lengths: Vec<usize> = EARTH_RADIUS.iter().map(|s| s.len()).collect();
        assert_eq!(lengths, vec![40, 10, 6, 2, 1]);
    }

    #[test]
    fn test_evaluate_at_epoch() {
        // At t = 0 every term contributes A cos(B)
        let expected: f64 = EARTH_R0.iter().map(|term| term.amplitude * term.phase.cos()).sum();
        assert_eq!(evaluate(&EARTH_R0, 0.0), expected);
        // Higher orders vanish at the epoch
        assert_eq!(evaluate_orders(&EARTH_RADIUS, 0.0), expected / 1e8);
    }

    #[test]
    fn test_horner_matches_power_sum() {
        let t = 0.123;
        let direct: f64 = EARTH_LONGITUDE
            .iter()
            .enumerate()
            .map(|(k, series)| evaluate(series, t) * t.powi(k as i32))
            .sum::<f64>()
            / 1e8;
        assert_abs_diff_eq!(evaluate_orders(&EARTH_LONGITUDE, t), direct, epsilon = 1e-9);
    }

    #[test]
    fn test_meeus_example_25b() {
        // 1992 October 13.0 TD
        let position = earth_heliocentric_at(2_448_908.5);
        let longitude = position.longitude.to_degrees().rem_euclid(360.0);
        assert_abs_diff_eq!(longitude, 19.907372, epsilon = 1e-3);
        assert_abs_diff_eq!(position.latitude.to_degrees(), -0.000179, epsilon = 1e-5);
        assert_abs_diff_eq!(position.radius, 0.99760775, epsilon = 1e-6);
    }
}
