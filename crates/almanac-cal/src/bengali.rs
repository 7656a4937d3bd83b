//! Bengali-revised calendar conversion.
//!
//! The revised (Bangladesh, 1987/2019) calendar is civil arithmetic: six
//! 31-day months, then five 30-day months with Falgun taking 29 or 30
//! days, anchored at 1425-01-01 = 2018-04-15 Gregorian. Conversion walks
//! day counts from that anchor and is accurate to within a day.

use chrono::{Days, NaiveDate};

/// First year the revised leap pattern is anchored for; earlier years are
/// not supported.
pub const FIRST_SUPPORTED_YEAR: i32 = 1425;

/// Rough Bengali year for a Gregorian year, used only when a rule omits
/// the year. 2021 CE maps to 1428 BS.
#[must_use]
pub const fn default_bengali_year(gregorian_year: i32) -> i32 {
    gregorian_year - 593
}

/// Converts a Bengali-revised date to a Gregorian date.
///
/// `None` for years before [`FIRST_SUPPORTED_YEAR`] or out-of-range
/// month/day fields.
#[must_use]
pub fn bengali_to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year < FIRST_SUPPORTED_YEAR || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let anchor = NaiveDate::from_ymd_opt(2018, 4, 15)?;

    let elapsed = year - FIRST_SUPPORTED_YEAR;
    let mut days = elapsed * 365 + (elapsed + 2) / 4;

    if month > 6 {
        days += 6 * 31;
        let rem_month = i32::try_from(month).ok()? - 6 - 1;
        if rem_month > 4 {
            // Falgun, the short month, has already passed.
            days -= 1;
        }
        days += rem_month * 30;
    } else {
        days += (i32::try_from(month).ok()? - 1) * 31;
    }
    days += i32::try_from(day).ok()? - 1;

    anchor.checked_add_days(Days::new(u64::try_from(days).ok()?))
}
