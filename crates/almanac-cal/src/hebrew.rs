//! Hebrew calendar conversion.
//!
//! Rule months are numbered biblically (Nisan = 1 .. Adar = 12), which is
//! exactly the `BookHebrew` numbering: the year changes at Tishri, so
//! Nisan of 5781 falls in the Gregorian spring of 2021. "Adar" is month
//! 12 — Adar I in leap years.

use calendrical_calculations::hebrew::BookHebrew;
use chrono::NaiveDate;

use crate::fixed::date_from_fixed;

/// Rough Hebrew year for a Gregorian year, used only when a rule omits
/// the year. 2021 CE maps to 5781 AM.
#[must_use]
pub const fn default_hebrew_year(gregorian_year: i32) -> i32 {
    gregorian_year + 3760
}

/// Converts a Hebrew date (biblical month numbering) to a Gregorian date.
///
/// `None` when the day does not exist in that month of that year
/// (e.g. 30 Cheshvan in a deficient year).
#[must_use]
pub fn hebrew_to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || day == 0 {
        return None;
    }
    let month = u8::try_from(month).ok()?;
    let day = u8::try_from(day).ok()?;
    if day > BookHebrew::last_day_of_book_hebrew_month(year, month) {
        return None;
    }
    let fixed = BookHebrew::fixed_from_book_hebrew(BookHebrew { year, month, day });
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
        assert_eq!(default_hebrew_year(2021), 5781);
    }

    #[test]
    fn reference_dates() {
        // 1 Nisan 5781.
        assert_eq!(hebrew_to_gregorian(5781, 1, 1), Some(ymd(2021, 3, 14)));
        // 24 Tishrei 5781 (autumn months fall in the prior Gregorian year).
        assert_eq!(hebrew_to_gregorian(5781, 7, 24), Some(ymd(2020, 10, 12)));
        // 28 Adar 5781 (common year).
        assert_eq!(hebrew_to_gregorian(5781, 12, 28), Some(ymd(2021, 3, 12)));
    }

    #[test]
    fn rejects_nonexistent_days() {
        assert_eq!(hebrew_to_gregorian(5781, 2, 30), None); // Iyyar has 29 days
        assert_eq!(hebrew_to_gregorian(5781, 13, 1), None);
        assert_eq!(hebrew_to_gregorian(5781, 1, 0), None);
    }
}
