//! The 24 solar terms
//!
//! Term codes count from the vernal equinox in steps of 15 degrees of
//! apparent solar longitude, so a term's code times 15 is the longitude the
//! Sun reaches at its start.

use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Number of solar terms in a tropical year
pub const TERM_COUNT: u8 = 24;
/// Solar longitude between consecutive terms, in degrees
pub const TERM_SPACING_DEG: f64 = 15.0;

/// A solar term, identified by its code in [0, 24)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SolarTerm {
    VernalEquinox = 0,
    ClearAndBright,
    GrainRain,
    SummerBegins,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    SlightHeat,
    GreatHeat,
    AutumnBegins,
    StoppingTheHeat,
    WhiteDews,
    AutumnEquinox,
    ColdDews,
    HoarFrostFalls,
    WinterBegins,
    LightSnow,
    HeavySnow,
    WinterSolstice,
    SlightCold,
    GreatCold,
    SpringBegins,
    TheRains,
    InsectsAwaken,
}

/// (traditional name, English name) indexed by code
static TERM_NAMES: [(&str, &str); 24] = [
    ("春分", "Vernal Equinox"),
    ("清明", "Clear and Bright"),
    ("谷雨", "Grain Rain"),
    ("立夏", "Summer Begins"),
    ("小满", "Grain Buds"),
    ("芒种", "Grain in Ear"),
    ("夏至", "Summer Solstice"),
    ("小暑", "Slight Heat"),
    ("大暑", "Great Heat"),
    ("立秋", "Autumn Begins"),
    ("处暑", "Stopping the Heat"),
    ("白露", "White Dews"),
    ("秋分", "Autumn Equinox"),
    ("寒露", "Cold Dews"),
    ("霜降", "Hoar Frost Falls"),
    ("立冬", "Winter Begins"),
    ("小雪", "Light Snow"),
    ("大雪", "Heavy Snow"),
    ("冬至", "Winter Solstice"),
    ("小寒", "Slight Cold"),
    ("大寒", "Great Cold"),
    ("立春", "Spring Begins"),
    ("雨水", "The Rains"),
    ("惊蛰", "Insects Awaken"),
];

lazy_static! {
    /// Lowercase traditional, English and identifier-style names to terms
    static ref TERMS_BY_NAME: HashMap<String, SolarTerm> = {
        let mut m = HashMap::new();
        for term in SolarTerm::ALL {
            let (name, english) = TERM_NAMES[term.code() as usize];
            m.insert(name.to_string(), term);
            m.insert(english.to_lowercase(), term);
            m.insert(english.to_lowercase().replace(' ', "_"), term);
        }
        m
    };
}

impl SolarTerm {
    /// All terms in code order
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::VernalEquinox,
        SolarTerm::ClearAndBright,
        SolarTerm::GrainRain,
        SolarTerm::SummerBegins,
        SolarTerm::GrainBuds,
        SolarTerm::GrainInEar,
        SolarTerm::SummerSolstice,
        SolarTerm::SlightHeat,
        SolarTerm::GreatHeat,
        SolarTerm::AutumnBegins,
        SolarTerm::StoppingTheHeat,
        SolarTerm::WhiteDews,
        SolarTerm::AutumnEquinox,
        SolarTerm::ColdDews,
        SolarTerm::HoarFrostFalls,
        SolarTerm::WinterBegins,
        SolarTerm::LightSnow,
        SolarTerm::HeavySnow,
        SolarTerm::WinterSolstice,
        SolarTerm::SlightCold,
        SolarTerm::GreatCold,
        SolarTerm::SpringBegins,
        SolarTerm::TheRains,
        SolarTerm::InsectsAwaken,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Term for a code; codes wrap modulo 24
    pub fn from_code(code: u32) -> SolarTerm {
        Self::ALL[(code % TERM_COUNT as u32) as usize]
    }

    /// Term starting at a solar longitude, if it is a multiple of 15 degrees
    pub fn from_longitude(longitude: f64) -> Option<SolarTerm> {
        let steps = longitude / TERM_SPACING_DEG;
        if !steps.is_finite() || steps.fract() != 0.0 || !(0.0..24.0).contains(&steps) {
            return None;
        }
        Some(Self::from_code(steps as u32))
    }

    /// Apparent solar longitude at the start of the term, in degrees
    pub fn longitude(self) -> f64 {
        self.code() as f64 * TERM_SPACING_DEG
    }

    /// Traditional two-character name
    pub fn name(self) -> &'static str {
        TERM_NAMES[self.code() as usize].0
    }

    pub fn english_name(self) -> &'static str {
        TERM_NAMES[self.code() as usize].1
    }

    pub fn next(self) -> SolarTerm {
        Self::from_code(self.code() as u32 + 1)
    }

    pub fn previous(self) -> SolarTerm {
        Self::from_code(self.code() as u32 + TERM_COUNT as u32 - 1)
    }

    /// Whether this term opens a month of the traditional calendar (節)
    ///
    /// These are the odd multiples of 15 degrees; the even ones are the
    /// mid-month terms (中氣).
    pub fn is_sectional(self) -> bool {
        self.code() % 2 == 1
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string names no solar term
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown solar term: {0}")]
pub struct UnknownTerm(pub String);

impl FromStr for SolarTerm {
    type Err = UnknownTerm;

    /// Accepts the traditional name, the English name in any case, or the
    /// English name with underscores (`winter_solstice`, `WINTER_SOLSTICE`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        TERMS_BY_NAME
            .get(&key)
            .copied()
            .ok_or_else(|| UnknownTerm(s.to_string()))
    }
}

impl Serialize for SolarTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
