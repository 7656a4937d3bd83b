//! Shared primitives for the almanac workspace.
//!
//! Kept dependency-light on purpose: the ISO weekday type, minute-of-day
//! clock arithmetic, and the timezone specification used by astronomical
//! rules. Calendar conversions and rule evaluation live in the
//! `almanac-cal` and `almanac-rules` crates.

mod clock;
mod weekday;
mod zone;

pub use clock::MinuteOfDay;
pub use weekday::{Weekday, WeekdaySet};
pub use zone::ZoneSpec;
