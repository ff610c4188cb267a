//! Newton-Raphson search for the instant of a solar term
//!
//! Starting from a calendar estimate near the expected date, the solver
//! steps along the apparent solar longitude until two successive estimates
//! agree to within the tolerance. The derivative is a central difference.

use super::terms::SolarTerm;
use crate::planetlib::sun::{apparent_longitude, normalize_degrees};
use crate::time::CalendarTuple;
use crate::{Result, SolarTermError};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Signed difference `a - b` of two longitudes, in (-180, 180]
fn longitude_difference(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Calendar estimate of the date a longitude is reached, as a Julian date
///
/// The month is `ceil((angle + 90) / 30)` wrapped into 1..=12. Terms at odd
/// multiples of 15 degrees fall early in their month and start on the 6th,
/// the others on the 20th, both at noon.
pub fn initial_estimate(year: i32, angle: f64) -> Result<f64> {
    let mut month = ((angle + 90.0) / 30.0).ceil() as u32;
    if month > 12 {
        month -= 12;
    }
    let day = if angle % 15.0 == 0.0 && angle % 30.0 != 0.0 {
        6
    } else {
        20
    };

    Ok(CalendarTuple::new(year, month, day, 12, 0, 0.0).to_jd()?)
}

/// Root finder for the apparent solar longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarTermSolver {
    /// Upper bound on Newton steps before giving up
    pub max_iterations: u32,
    /// Convergence threshold on the step size, in days
    pub tolerance_days: f64,
    /// Half-width of the central difference, in days
    pub derivative_step_days: f64,
}

impl Default for SolarTermSolver {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance_days: 1e-7,
            derivative_step_days: 0.000005,
        }
    }
}

impl SolarTermSolver {
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance_days(mut self, tolerance_days: f64) -> Self {
        self.tolerance_days = tolerance_days;
        self
    }

    /// Check the parameters describe a usable search
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SolarTermError::Config(
                "solver needs at least one iteration".to_string(),
            ));
        }
        if !(self.tolerance_days.is_finite() && self.tolerance_days > 0.0) {
            return Err(SolarTermError::Config(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance_days
            )));
        }
        if !(self.derivative_step_days.is_finite() && self.derivative_step_days > 0.0) {
            return Err(SolarTermError::Config(format!(
                "derivative step must be positive, got {}",
                self.derivative_step_days
            )));
        }
        Ok(())
    }

    /// Terrestrial Time Julian date at which `term` begins in `year`
    ///
    /// The Winter Solstice of `year` is the December one; every other term
    /// falls in its usual month of `year`.
    pub fn solve(&self, year: i32, term: SolarTerm) -> Result<f64> {
        self.search(year, term.longitude())
    }

    /// Like [`solve`](Self::solve), for a target longitude in degrees
    ///
    /// The angle must be one of the term longitudes 0, 15, ..., 345.
    pub fn solve_angle(&self, year: i32, angle: f64) -> Result<f64> {
        let term = SolarTerm::from_longitude(angle).ok_or_else(|| {
            SolarTermError::InvalidInput(format!(
                "{} is not a multiple of 15 degrees in [0, 360)",
                angle
            ))
        })?;
        self.solve(year, term)
    }

    fn derivative(&self, jd: f64) -> f64 {
        let h = self.derivative_step_days;
        longitude_difference(apparent_longitude(jd + h), apparent_longitude(jd - h)) / (2.0 * h)
    }

    fn search(&self, year: i32, angle: f64) -> Result<f64> {
        let mut current = initial_estimate(year, angle)?;
        let mut last_step = f64::NAN;

        for iteration in 1..=self.max_iterations {
            // Near the vernal equinox the longitude wraps from 360 to 0
            let residual = longitude_difference(apparent_longitude(current), angle);
            let slope = self.derivative(current);
            let step = residual / slope;

            if slope == 0.0 || !step.is_finite() {
                debug!(
                    "solar longitude {} in {}: unusable derivative {} at JD {}",
                    angle, year, slope, current
                );
                return Err(SolarTermError::NonConvergence {
                    angle,
                    year,
                    iterations: iteration,
                    last_step,
                });
            }

            let next = current - step;
            last_step = next - current;
            trace!(
                "solar longitude {} in {}: iteration {} JD {:.8} step {:.3e}",
                angle,
                year,
                iteration,
                next,
                last_step
            );

            if last_step.abs() <= self.tolerance_days {
                debug!(
                    "solar longitude {} in {} reached at JD(TT) {:.8} after {} iterations",
                    angle, year, next, iteration
                );
                return Ok(next);
            }
            current = next;
        }

        Err(SolarTermError::NonConvergence {
            angle,
            year,
            iterations: self.max_iterations,
            last_step,
        })
    }
}
