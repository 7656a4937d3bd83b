//! Holiday rule expressions: parsing and evaluation.
//!
//! A rule is a compact textual expression describing a recurring holiday
//! date — `easter -2`, `17 Dhu al-Hijjah`, `march equinox in Asia/Tokyo`,
//! `substitutes 2021-08-01 if Sunday then next Monday` — referencing one
//! of several calendar systems and qualified by offsets, weekday
//! substitutions, and enable/disable filters.
//!
//! [`parse`] turns a rule string into an immutable [`Rule`]; the rule is
//! then evaluated any number of times against a caller-supplied default
//! year:
//!
//! ```
//! use almanac_rules::parse;
//!
//! let rule = parse("easter +49")?;
//! let date = rule.calculate_date(2021);
//! assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2021, 5, 23));
//! # Ok::<(), almanac_rules::ParseError>(())
//! ```
//!
//! Evaluation is pure: no I/O, no shared state, safe to run concurrently
//! on one `Rule` from many threads. "The rule does not apply this year"
//! is `None`, not an error.

pub mod parse;
pub mod rule;

mod months;

pub use almanac_cal::EastAsianKind;
pub use almanac_core::{MinuteOfDay, Weekday, WeekdaySet, ZoneSpec};
pub use months::{HebrewMonth, HijriMonth};
pub use parse::{ParseError, ParseErrorKind, parse};
pub use rule::{
    BranchAction, CalendarDate, ConditionalBranch, DateFieldError, ExtraBranch, Rule,
    SexagenaryYear, ValidityWindow, WeekdayShift, YearFilter, YearInterval,
};
