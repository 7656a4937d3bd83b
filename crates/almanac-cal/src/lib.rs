//! Calendar conversion functions.
//!
//! Every function here is a deterministic, stateless mapping from
//! calendar-specific raw fields to a proleptic-Gregorian date (or
//! date-time, for the astronomical events). "This date does not exist" —
//! a leap month absent from a year, a day past the end of a lunar month,
//! a Bengali year before the revised calendar — is `None`, never an
//! error: rule evaluation treats it as "not applicable".
//!
//! The lunisolar and fixed-arithmetic calendars build on the
//! Reingold/Dershowitz algorithms in the `calendrical_calculations`
//! crate; Easter, the Bengali revision, the solar-term table, and the
//! equinox/solstice polynomials are implemented here directly.

pub mod astro;
pub mod bengali;
pub mod east_asian;
pub mod easter;
pub mod gregorian;
pub mod hebrew;
pub mod hijri;

mod fixed;

pub use east_asian::EastAsianKind;
pub use fixed::{date_from_fixed, fixed_from_date};
