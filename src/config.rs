//! Configuration for the solar-term calendar
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "utc_offset_seconds": 32400, "delta_t": { "acceleration": 32.0 } }
//! ```

use crate::almanac::solver::SolarTermSolver;
use crate::constants::DEFAULT_UTC_OFFSET_S;
use crate::time::{utc_offset_from_seconds, DeltaT, Timescale};
use crate::{Result, SolarTermError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do with a year outside the supported range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearPolicy {
    /// Report the year as invalid input
    #[default]
    Reject,
    /// Quietly use the current year instead
    CurrentYear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Civil zone as seconds east of UTC
    pub utc_offset_seconds: i32,
    pub delta_t: DeltaT,
    pub solver: SolarTermSolver,
    pub year_policy: YearPolicy,
    /// First year served by the catalog
    pub min_year: i32,
    /// Last year served by the catalog
    pub max_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_seconds: DEFAULT_UTC_OFFSET_S,
            delta_t: DeltaT::default(),
            solver: SolarTermSolver::default(),
            year_policy: YearPolicy::default(),
            min_year: 1900,
            max_year: 2100,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| SolarTermError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SolarTermError::Config(format!("cannot serialize configuration: {}", e)))
    }

    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }

    pub fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// Set the civil zone from a whole or fractional number of hours
    ///
    /// Non-finite hours are rejected; the range is checked by `validate`.
    pub fn with_utc_offset_hours(self, hours: f64) -> Result<Self> {
        if !hours.is_finite() {
            return Err(SolarTermError::InvalidInput(format!(
                "UTC offset of {} hours",
                hours
            )));
        }
        Ok(self.with_utc_offset_seconds((hours * 3600.0).round() as i32))
    }

    pub fn with_delta_t(mut self, delta_t: DeltaT) -> Self {
        self.delta_t = delta_t;
        self
    }

    pub fn with_solver(mut self, solver: SolarTermSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_year_policy(mut self, policy: YearPolicy) -> Self {
        self.year_policy = policy;
        self
    }

    pub fn with_year_range(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn validate(&self) -> Result<()> {
        utc_offset_from_seconds(self.utc_offset_seconds)
            .map_err(|e| SolarTermError::Config(e.to_string()))?;

        if self.min_year > self.max_year {
            return Err(SolarTermError::Config(format!(
                "year range {}..={} is empty",
                self.min_year, self.max_year
            )));
        }

        let dt = &self.delta_t;
        if ![dt.base_value, dt.linear_rate, dt.pivot_year, dt.acceleration]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(SolarTermError::Config(
                "delta T parameters must be finite".to_string(),
            ));
        }

        self.solver.validate()
    }

    /// Time scale for the configured ΔT model and zone
    pub fn timescale(&self) -> Result<Timescale> {
        let offset = utc_offset_from_seconds(self.utc_offset_seconds)
            .map_err(|e| SolarTermError::Config(e.to_string()))?;
        Ok(Timescale::new(self.delta_t, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::delta_t::NASA_ACCELERATION;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.utc_offset_seconds, 28_800);
        assert_eq!(config.year_policy, YearPolicy::Reject);
        assert_eq!((config.min_year, config.max_year), (1900, 2100));
        assert_eq!(config.solver.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(
            r#"{ "utc_offset_seconds": 32400, "delta_t": { "acceleration": 32.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.utc_offset_seconds, 32_400);
        assert_eq!(config.delta_t.acceleration, NASA_ACCELERATION);
        assert_eq!(config.delta_t.base_value, 64.7);
        assert_eq!(config.year_policy, YearPolicy::Reject);
    }

    #[test]
    fn test_year_policy_names() {
        let config = Config::from_json_str(r#"{ "year_policy": "current_year" }"#).unwrap();
        assert_eq!(config.year_policy, YearPolicy::CurrentYear);
        assert!(Config::from_json_str(r#"{ "year_policy": "sometimes" }"#).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solarterm.json");

        let config = Config::new()
            .with_utc_offset_hours(-5.0)
            .unwrap()
            .with_delta_t(DeltaT::with_acceleration(NASA_ACCELERATION))
            .with_year_policy(YearPolicy::CurrentYear)
            .with_year_range(1950, 2050);
        config.save_json_file(&path).unwrap();

        let loaded = Config::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.utc_offset_seconds, -18_000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::new().with_utc_offset_seconds(90_000).validate(),
            Err(SolarTermError::Config(_))
        ));
        assert!(Config::new().with_year_range(2100, 1900).validate().is_err());
        assert!(Config::from_json_str(r#"{ "solver": { "max_iterations": 0 } }"#).is_err());
        assert!(Config::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::from_json_file(dir.path().join("absent.json")),
            Err(SolarTermError::Io(_))
        ));
    }

    #[test]
    fn test_timescale() {
        let ts = Config::new()
            .with_utc_offset_hours(9.0)
            .unwrap()
            .timescale()
            .unwrap();
        assert_eq!(ts.utc_offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_fractional_offset_hours() {
        let config = Config::new().with_utc_offset_hours(5.5).unwrap();
        assert_eq!(config.utc_offset_seconds, 19_800);
        assert!(Config::new().with_utc_offset_hours(30.0).unwrap().validate().is_err());
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_non_finite_offset_hours_rejected(#[case] hours: f64) {
        assert!(matches!(
            Config::new().with_utc_offset_hours(hours),
            Err(SolarTermError::InvalidInput(_))
        ));
    }
}
