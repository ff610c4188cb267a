//! Annual catalog of solar terms and queries around a date
//!
//! A year's catalog runs from the Winter Solstice of the year before to the
//! Winter Solstice of the year itself: 25 terms, each carrying its civil
//! date-time in the configured zone.

use super::solver::SolarTermSolver;
use super::terms::{SolarTerm, TERM_COUNT};
use crate::config::{Config, YearPolicy};
use crate::time::{parse_datetime, Timescale};
use crate::{Result, SolarTermError};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{debug, warn};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;

/// Number of records in a year's catalog
pub const RECORDS_PER_YEAR: usize = TERM_COUNT as usize + 1;

/// The start of one solar term
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTermRecord {
    /// Civil date-time, rounded to the second
    pub datetime: DateTime<FixedOffset>,
    pub term: SolarTerm,
    /// The same instant as a Terrestrial Time Julian date
    pub jd_tt: f64,
}

impl SolarTermRecord {
    pub fn code(&self) -> u8 {
        self.term.code()
    }

    pub fn name(&self) -> &'static str {
        self.term.name()
    }

    /// Civil date of the term
    pub fn date(&self) -> NaiveDate {
        self.datetime.date_naive()
    }

    /// `YYYY-MM-DD HH:MM:SS` in the civil zone
    pub fn date_string(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// `YYYYMMDD` in the civil zone
    pub fn date_key(&self) -> String {
        self.datetime.format("%Y%m%d").to_string()
    }
}

impl Serialize for SolarTermRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SolarTermRecord", 4)?;
        state.serialize_field("date", &self.date_string())?;
        state.serialize_field("term_code", &self.code())?;
        state.serialize_field("term_name", self.name())?;
        state.serialize_field("jd_tt", &self.jd_tt)?;
        state.end()
    }
}

/// How [`SolarTermCalendar::solar_terms`] keys its map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Position in the catalog, 0 to 24
    #[default]
    Index,
    /// Civil date as `YYYYMMDD`
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKey {
    Index(usize),
    Date(String),
}

impl Serialize for TermKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TermKey::Index(i) => serializer.serialize_str(&i.to_string()),
            TermKey::Date(d) => serializer.serialize_str(d),
        }
    }
}

/// Which neighbour of a date to pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    Previous,
    Current,
    Next,
}

/// Terms around a date
///
/// `current` is the term falling on the date itself, if any. `previous` and
/// `next` are the nearest terms on strictly earlier and strictly later days.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct AdjacentTerms {
    pub previous: Option<SolarTermRecord>,
    pub current: Option<SolarTermRecord>,
    pub next: Option<SolarTermRecord>,
}

impl AdjacentTerms {
    pub fn get(&self, which: Adjacency) -> Option<&SolarTermRecord> {
        match which {
            Adjacency::Previous => self.previous.as_ref(),
            Adjacency::Current => self.current.as_ref(),
            Adjacency::Next => self.next.as_ref(),
        }
    }
}

/// A date to look terms up around
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// The current system time
    Now,
    /// A string such as `2019-12-22` or `2019-12-22 12:00:00`, in the civil zone
    Text(String),
    /// A civil date-time in the configured zone
    Civil(NaiveDateTime),
    /// An instant in any zone
    Instant(DateTime<FixedOffset>),
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::Civil(dt)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Civil(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::Instant(dt.fixed_offset())
    }
}

/// Solar-term catalog for a civil zone
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTermCalendar {
    timescale: Timescale,
    solver: SolarTermSolver,
    year_policy: YearPolicy,
    min_year: i32,
    max_year: i32,
}

impl Default for SolarTermCalendar {
    fn default() -> Self {
        let config = Config::default();
        Self {
            timescale: Timescale::default(),
            solver: config.solver,
            year_policy: config.year_policy,
            min_year: config.min_year,
            max_year: config.max_year,
        }
    }
}

impl SolarTermCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            timescale: config.timescale()?,
            solver: config.solver,
            year_policy: config.year_policy,
            min_year: config.min_year,
            max_year: config.max_year,
        })
    }

    pub fn timescale(&self) -> &Timescale {
        &self.timescale
    }

    pub fn solver(&self) -> &SolarTermSolver {
        &self.solver
    }

    fn current_year(&self) -> i32 {
        Utc::now().with_timezone(&self.timescale.utc_offset()).year()
    }

    /// Apply the year policy to a requested year
    pub fn effective_year(&self, year: i32) -> Result<i32> {
        if (self.min_year..=self.max_year).contains(&year) {
            return Ok(year);
        }

        match self.year_policy {
            YearPolicy::Reject => Err(SolarTermError::InvalidInput(format!(
                "year {} outside supported range {}..={}",
                year, self.min_year, self.max_year
            ))),
            YearPolicy::CurrentYear => {
                let current = self.current_year();
                warn!(
                    "year {} outside {}..={}, using the current year {}",
                    year, self.min_year, self.max_year, current
                );
                Ok(current)
            }
        }
    }

    fn record(&self, jd_tt: f64, term: SolarTerm) -> Result<SolarTermRecord> {
        Ok(SolarTermRecord {
            datetime: self.timescale.civil_datetime(jd_tt)?,
            term,
            jd_tt,
        })
    }

    /// Catalog without the year policy, used internally for neighbouring years
    fn build_year(&self, year: i32) -> Result<Vec<SolarTermRecord>> {
        let mut records = Vec::with_capacity(RECORDS_PER_YEAR);
        let mut working_year = year - 1;
        let mut term = SolarTerm::WinterSolstice;

        for _ in 0..RECORDS_PER_YEAR {
            let jd_tt = self.solver.solve(working_year, term)?;
            records.push(self.record(jd_tt, term)?);
            if term == SolarTerm::WinterSolstice {
                working_year += 1;
            }
            term = term.next();
        }

        debug!("built {} solar terms for {}", records.len(), year);
        Ok(records)
    }

    /// The 25 terms from the previous year's Winter Solstice to this year's
    pub fn year_terms(&self, year: i32) -> Result<Vec<SolarTermRecord>> {
        let year = self.effective_year(year)?;
        self.build_year(year)
    }

    /// A year's terms as a map keyed by position or by civil date
    pub fn solar_terms(
        &self,
        year: i32,
        mode: KeyMode,
    ) -> Result<BTreeMap<TermKey, SolarTermRecord>> {
        let records = self.year_terms(year)?;
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let key = match mode {
                    KeyMode::Index => TermKey::Index(index),
                    KeyMode::Date => TermKey::Date(record.date_key()),
                };
                (key, record)
            })
            .collect())
    }

    /// The occurrence of `term` whose civil date lies in `year`
    pub fn find_term(&self, year: i32, term: SolarTerm) -> Result<SolarTermRecord> {
        let effective = self.effective_year(year)?;
        self.build_year(effective)?
            .into_iter()
            .rev()
            .find(|record| record.term == term && record.datetime.year() == effective)
            .ok_or_else(|| {
                SolarTermError::InvalidInput(format!(
                    "{} does not fall in the civil year {}",
                    term.english_name(),
                    effective
                ))
            })
    }

    /// Civil date-time of an input in the configured zone
    pub fn resolve(&self, input: DateInput) -> Result<NaiveDateTime> {
        let offset = self.timescale.utc_offset();
        match input {
            DateInput::Now => Ok(Utc::now().with_timezone(&offset).naive_local()),
            DateInput::Text(text) => {
                parse_datetime(&text).map_err(|e| SolarTermError::InvalidInput(e.to_string()))
            }
            DateInput::Civil(dt) => Ok(dt),
            DateInput::Instant(dt) => Ok(dt.with_timezone(&offset).naive_local()),
        }
    }

    /// Terms before, on and after the civil day of `input`
    ///
    /// Only the calendar day of the input matters, not its time of day.
    pub fn recent_solar_term<D: Into<DateInput>>(&self, input: D) -> Result<AdjacentTerms> {
        let local = self.resolve(input.into())?;
        let day = local.date();
        let year = self.effective_year(day.year())?;

        let mut adjacent = AdjacentTerms::default();
        for record in self.build_year(year)? {
            let date = record.date();
            if date < day {
                adjacent.previous = Some(record);
            } else if date == day {
                adjacent.current = Some(record);
            } else if adjacent.next.is_none() {
                adjacent.next = Some(record);
            }
        }

        if adjacent.next.is_none() {
            adjacent.next = self
                .build_year(year + 1)?
                .into_iter()
                .find(|record| record.date() > day);
        }

        Ok(adjacent)
    }

    pub fn previous_solar_term<D: Into<DateInput>>(
        &self,
        input: D,
    ) -> Result<Option<SolarTermRecord>> {
        Ok(self.recent_solar_term(input)?.previous)
    }

    pub fn current_solar_term<D: Into<DateInput>>(
        &self,
        input: D,
    ) -> Result<Option<SolarTermRecord>> {
        Ok(self.recent_solar_term(input)?.current)
    }

    pub fn next_solar_term<D: Into<DateInput>>(
        &self,
        input: D,
    ) -> Result<Option<SolarTermRecord>> {
        Ok(self.recent_solar_term(input)?.next)
    }
}
