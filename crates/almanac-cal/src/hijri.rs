//! Hijri (Islamic) calendar conversion.
//!
//! Uses the arithmetic tabular calendar with the civil (Friday) epoch:
//! deterministic, proleptic, and within a day of the observational
//! calendars for the years holiday data cares about.

use calendrical_calculations::islamic::{ISLAMIC_EPOCH_FRIDAY, fixed_from_tabular_islamic};
use chrono::NaiveDate;

use crate::fixed::date_from_fixed;

/// Rough Hijri year for a Gregorian year, used only when a rule omits the
/// year. 2021 CE maps to 1442 AH.
#[must_use]
pub const fn default_hijri_year(gregorian_year: i32) -> i32 {
    gregorian_year - 579
}

/// Converts a tabular Hijri date to a Gregorian date.
///
/// Day 30 of a 29-day month resolves one day into the following month,
/// matching the tolerance of the source data rather than rejecting it.
#[must_use]
pub fn hijri_to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return None;
    }
    let fixed = fixed_from_tabular_islamic(
        year,
        u8::try_from(month).ok()?,
        u8::try_from(day).ok()?,
        ISLAMIC_EPOCH_FRIDAY,
    );
    date_from_fixed(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_year_anchor() {
        assert_eq!(default_hijri_year(2021), 1442);
    }

    #[test]
    fn reference_dates() {
        // 17 Dhu al-Hijjah 1442.
        assert_eq!(hijri_to_gregorian(1442, 12, 17), Some(ymd(2021, 7, 27)));
        // 29 Muharram 1442 and the year start.
        assert_eq!(hijri_to_gregorian(1442, 1, 29), Some(ymd(2020, 9, 17)));
        assert_eq!(hijri_to_gregorian(1442, 1, 1), Some(ymd(2020, 8, 20)));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(hijri_to_gregorian(1442, 13, 1), None);
        assert_eq!(hijri_to_gregorian(1442, 0, 1), None);
        assert_eq!(hijri_to_gregorian(1442, 1, 31), None);
    }
}
