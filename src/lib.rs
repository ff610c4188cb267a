//! Solarterm: the 24 solar terms of the East-Asian calendar
//!
//! This crate finds the instants at which the Sun's apparent geocentric
//! ecliptic longitude crosses each multiple of 15 degrees, using a truncated
//! VSOP87 theory for the Sun, IAU 1980 nutation and an empirical ΔT model,
//! and reports them as civil date-times in a fixed-offset zone.
//!
//! ```no_run
//! use solarterm::{KeyMode, SolarTermCalendar};
//!
//! let calendar = SolarTermCalendar::new();
//! for record in calendar.year_terms(2024)? {
//!     println!("{} {}", record.date_string(), record.name());
//! }
//! let around = calendar.recent_solar_term("2024-06-21")?;
//! # let _ = (around, KeyMode::Date);
//! # Ok::<(), solarterm::SolarTermError>(())
//! ```

use thiserror::Error;

pub mod almanac;
pub mod config;
pub mod constants;
pub mod nutationlib;
pub mod planetlib;
pub mod time;

// Re-export commonly used types
pub use almanac::{
    AdjacentTerms, Adjacency, DateInput, KeyMode, SolarTerm, SolarTermCalendar, SolarTermRecord,
    SolarTermSolver, TermKey,
};
pub use config::{Config, YearPolicy};
pub use time::{CalendarTuple, DeltaT, TimeError, Timescale};

/// Main error type for the solarterm library
#[derive(Debug, Error)]
pub enum SolarTermError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No convergence for solar longitude {angle} in {year} after {iterations} iterations")]
    NonConvergence {
        angle: f64,
        year: i32,
        iterations: u32,
        last_step: f64,
    },

    #[error("Delta T is not defined for year {year}")]
    DeltaTOutOfRange { year: f64 },

    #[error("Time error: {0}")]
    Time(TimeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TimeError> for SolarTermError {
    fn from(err: TimeError) -> Self {
        match err {
            TimeError::DeltaTOutOfRange { year } => SolarTermError::DeltaTOutOfRange { year },
            other => SolarTermError::Time(other),
        }
    }
}

/// Result type for solarterm operations
pub type Result<T> = std::result::Result<T, SolarTermError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_t_errors_surface_directly() {
        let err: SolarTermError = TimeError::DeltaTOutOfRange { year: -5000.0 }.into();
        assert!(matches!(err, SolarTermError::DeltaTOutOfRange { year } if year == -5000.0));

        let err: SolarTermError = TimeError::CalendarError("bad".to_string()).into();
        assert!(matches!(err, SolarTermError::Time(TimeError::CalendarError(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = SolarTermError::InvalidInput("year 1800".to_string());
        assert_eq!(err.to_string(), "Invalid input: year 1800");

        let err = SolarTermError::NonConvergence {
            angle: 270.0,
            year: 2019,
            iterations: 50,
            last_step: 0.5,
        };
        assert!(err.to_string().contains("270"));
    }
}
