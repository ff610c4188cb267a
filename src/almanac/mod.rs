//! Solar terms: names, the root finder and the annual catalog

pub mod catalog;
pub mod solver;
pub mod terms;

pub use catalog::{
    AdjacentTerms, Adjacency, DateInput, KeyMode, SolarTermCalendar, SolarTermRecord, TermKey,
};
pub use solver::SolarTermSolver;
pub use terms::SolarTerm;
