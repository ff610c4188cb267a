//! Solar position from analytical planetary theory
//!
//! [`vsop87`] evaluates the Earth's heliocentric series and [`sun`] turns
//! them into the Sun's apparent geocentric longitude.

pub mod sun;
pub mod vsop87;

pub use sun::apparent_longitude;
pub use vsop87::{earth_heliocentric, HeliocentricPosition, PeriodicTerm};
