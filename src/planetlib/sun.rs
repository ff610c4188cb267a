//! Apparent geocentric position of the Sun
//!
//! The geometric position comes from the Earth's VSOP87 coordinates turned
//! around by 180 degrees. The apparent longitude then adds the FK5 frame
//! correction and nutation in longitude, and removes annual aberration.

use super::vsop87::{evaluate_orders, EARTH_LATITUDE, EARTH_LONGITUDE, EARTH_RADIUS};
use crate::constants::{ASEC_PER_DEG, DEG2RAD, SOLAR_ABERRATION_ASEC};
use crate::nutationlib::nutation_in_longitude;
use crate::time::julian_millennia;

/// Reduce an angle in degrees into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Geometric geocentric longitude of the Sun in degrees, in [0, 360)
pub fn geocentric_longitude(t: f64) -> f64 {
    let heliocentric = evaluate_orders(&EARTH_LONGITUDE, t).to_degrees();
    normalize_degrees(normalize_degrees(heliocentric) + 180.0)
}

/// Geometric geocentric latitude of the Sun in degrees
pub fn geocentric_latitude(t: f64) -> f64 {
    -evaluate_orders(&EARTH_LATITUDE, t).to_degrees()
}

/// Sun-Earth distance in AU
pub fn sun_earth_distance(t: f64) -> f64 {
    evaluate_orders(&EARTH_RADIUS, t)
}

/// Conversion of longitude from the VSOP87 dynamical frame to FK5, in degrees
///
/// `longitude` and `latitude` are the geocentric values in degrees. The
/// latitude term is `tan β` with β in degrees converted to radians, so it
/// contributes only microarcseconds.
pub fn frame_correction(longitude: f64, latitude: f64, t: f64) -> f64 {
    let centuries = t * 10.0;
    let shifted = (longitude - 1.397 * centuries - 0.00031 * centuries * centuries) * DEG2RAD;
    let beta = latitude * DEG2RAD;

    (-0.09033 + 0.03916 * (shifted.cos() + shifted.sin()) * beta.tan()) / ASEC_PER_DEG
}

/// Annual aberration in longitude for a Sun-Earth distance in AU, in degrees
///
/// Returned as a positive quantity; it is subtracted from the longitude.
pub fn aberration(radius: f64) -> f64 {
    SOLAR_ABERRATION_ASEC / radius / ASEC_PER_DEG
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees, in [0, 360)
///
/// `jde` is a Julian ephemeris date (TT).
pub fn apparent_longitude(jde: f64) -> f64 {
    let t = julian_millennia(jde);
    let longitude = geocentric_longitude(t);
    let latitude = geocentric_latitude(t);

    let corrected = longitude + frame_correction(longitude, latitude, t) + nutation_in_longitude(t)
        - aberration(sun_earth_distance(t));

    normalize_degrees(corrected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    // 1992 October 13.0 TD
    const MEEUS_25B_JDE: f64 = 2_448_908.5;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(-15.0, 345.0)]
    #[case(725.5, 5.5)]
    #[case(-1e-20, 0.0)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        let value = normalize_degrees(input);
        assert!((0.0..360.0).contains(&value));
        assert_abs_diff_eq!(value, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_geometric_position_meeus_25b() {
        let t = julian_millennia(MEEUS_25B_JDE);
        assert_abs_diff_eq!(geocentric_longitude(t), 199.907372, epsilon = 1e-3);
        assert_abs_diff_eq!(geocentric_latitude(t), 0.000179, epsilon = 1e-5);
        assert_abs_diff_eq!(sun_earth_distance(t), 0.99760775, epsilon = 1e-6);
    }

    #[test]
    fn test_corrections_meeus_25b() {
        let t = julian_millennia(MEEUS_25B_JDE);
        let longitude = geocentric_longitude(t);
        let latitude = geocentric_latitude(t);
        assert_abs_diff_eq!(
            frame_correction(longitude, latitude, t) * 3600.0,
            -0.09033,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(aberration(sun_earth_distance(t)) * 3600.0, 20.539, epsilon = 1e-3);
    }

    #[test]
    fn test_frame_correction_latitude_in_degrees() {
        let t = julian_millennia(MEEUS_25B_JDE);
        let longitude = geocentric_longitude(t);
        let on_ecliptic = frame_correction(longitude, 0.0, t);
        assert_abs_diff_eq!(on_ecliptic * 3600.0, -0.09033, epsilon = 1e-12);

        // One arcsecond of latitude moves the result by well under 1e-6 arcsec
        let shifted = frame_correction(longitude, 1.0 / 3600.0, t);
        assert!(((shifted - on_ecliptic) * 3600.0).abs() < 1e-6);
    }

    #[test]
    fn test_apparent_longitude_meeus_25b() {
        // 199 deg 54' 21.818"
        assert_abs_diff_eq!(apparent_longitude(MEEUS_25B_JDE), 199.906060, epsilon = 1e-3);
    }

    #[test]
    fn test_apparent_longitude_range_and_motion() {
        let start = 2_458_849.5;
        let mut previous = apparent_longitude(start);
        for day in 1..=400 {
            let current = apparent_longitude(start + day as f64);
            assert!((0.0..360.0).contains(&current));
            // The Sun moves roughly one degree per day
            let step = normalize_degrees(current - previous);
            assert!(step > 0.9 && step < 1.1, "step {} on day {}", step, day);
            previous = current;
        }
    }
}
