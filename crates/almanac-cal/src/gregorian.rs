//! Gregorian day and weekday arithmetic used by the modifier pipeline.

use almanac_core::Weekday;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Shifts a date-time by a signed number of days, preserving the time of
/// day. `None` on overflow of chrono's range.
#[must_use]
pub fn shift_days(datetime: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    datetime.checked_add_signed(chrono::Duration::days(days))
}

/// The strictly next (or strictly previous) date falling on `weekday`.
#[must_use]
pub fn step_weekday(date: NaiveDate, weekday: Weekday, next: bool) -> Option<NaiveDate> {
    let current = Weekday::from(date.weekday()).number();
    let target = weekday.number();
    if next {
        let ahead = (target + 7 - current - 1) % 7 + 1;
        date.checked_add_days(Days::new(u64::from(ahead)))
    } else {
        let back = (current + 7 - target - 1) % 7 + 1;
        date.checked_sub_days(Days::new(u64::from(back)))
    }
}

/// Shifts to the nth `weekday` strictly after (or before) the input,
/// preserving the time of day. `nth == 0` is a no-op.
#[must_use]
pub fn shift_weekday(
    datetime: NaiveDateTime,
    weekday: Weekday,
    nth: u32,
    after: bool,
) -> Option<NaiveDateTime> {
    let mut date = datetime.date();
    for _ in 0..nth {
        date = step_weekday(date, weekday, after)?;
    }
    Some(date.and_time(datetime.time()))
}

/// The nth occurrence of `weekday` within the given month. `None` when
/// the month has no nth occurrence.
#[must_use]
pub fn nth_weekday_in_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    nth: u32,
) -> Option<NaiveDate> {
    if nth == 0 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_weekday = Weekday::from(first.weekday()).number();
    let offset = (weekday.number() + 7 - first_weekday) % 7;
    let day = 1 + offset + 7 * (nth - 1);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The nth occurrence of `weekday` counting backwards from the first day
/// of the given month (exclusive).
#[must_use]
pub fn nth_weekday_before_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    nth: u32,
) -> Option<NaiveDate> {
    if nth == 0 {
        return None;
    }
    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    for _ in 0..nth {
        date = step_weekday(date, weekday, false)?;
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stepping_is_strict() {
        // 2021-08-01 is a Sunday.
        let sunday = ymd(2021, 8, 1);
        assert_eq!(
            step_weekday(sunday, Weekday::Sunday, true),
            Some(ymd(2021, 8, 8))
        );
        assert_eq!(
            step_weekday(sunday, Weekday::Sunday, false),
            Some(ymd(2021, 7, 25))
        );
        assert_eq!(
            step_weekday(sunday, Weekday::Monday, true),
            Some(ymd(2021, 8, 2))
        );
        assert_eq!(
            step_weekday(sunday, Weekday::Saturday, false),
            Some(ymd(2021, 7, 31))
        );
    }

    #[test]
    fn weekday_shifts() {
        let base = ymd(2021, 8, 1).and_hms_opt(14, 0, 0).unwrap();
        let shifted = shift_weekday(base, Weekday::Monday, 1, true).unwrap();
        assert_eq!(shifted.date(), ymd(2021, 8, 2));
        assert_eq!(shifted.time(), base.time());

        let shifted = shift_weekday(base, Weekday::Saturday, 2, false).unwrap();
        assert_eq!(shifted.date(), ymd(2021, 7, 24));

        assert_eq!(shift_weekday(base, Weekday::Friday, 0, true), Some(base));
    }

    #[test]
    fn nth_weekday_in_month_cases() {
        assert_eq!(
            nth_weekday_in_month(2021, 7, Weekday::Monday, 1),
            Some(ymd(2021, 7, 5))
        );
        assert_eq!(
            nth_weekday_in_month(2021, 8, Weekday::Sunday, 2),
            Some(ymd(2021, 8, 8))
        );
        // February 2021 has no fifth Sunday.
        assert_eq!(nth_weekday_in_month(2021, 2, Weekday::Sunday, 5), None);
    }

    #[test]
    fn nth_weekday_before_month_cases() {
        assert_eq!(
            nth_weekday_before_month(2021, 8, Weekday::Sunday, 2),
            Some(ymd(2021, 7, 18))
        );
        assert_eq!(
            nth_weekday_before_month(2021, 8, Weekday::Monday, 3),
            Some(ymd(2021, 7, 12))
        );
    }
}
