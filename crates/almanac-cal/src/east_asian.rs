//! East-Asian lunisolar calendars (Chinese, Korean, Vietnamese) and the
//! 24 solar terms.
//!
//! Lunar months come from the astronomical new-moon computations in
//! `calendrical_calculations::chinese_based`. The three calendars share
//! the month structure and differ only in the meridian used to observe
//! new moons; `Vietnamese` is a local implementation of the crate's
//! public `ChineseBased` trait with the UTC+8 to UTC+7 switch of 1968.
//!
//! Solar-term addressing uses the fixed anchor table below; published
//! term boundaries vary within a ±1 day range of the anchors.

use calendrical_calculations::chinese_based::{
    Chinese, ChineseBased, Dangi, YearBounds, days_in_month, days_until_month,
    month_structure_for_year,
};
use calendrical_calculations::gregorian::fixed_from_gregorian;
use calendrical_calculations::rata_die::RataDie;
use chrono::NaiveDate;

use crate::fixed::date_from_fixed;

/// Which East-Asian lunisolar calendar a rule names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EastAsianKind {
    Chinese,
    Korean,
    Vietnamese,
}

impl EastAsianKind {
    /// Looks up a calendar from its rule keyword, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chinese" => Some(Self::Chinese),
            "korean" => Some(Self::Korean),
            "vietnamese" => Some(Self::Vietnamese),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::Korean => "korean",
            Self::Vietnamese => "vietnamese",
        }
    }
}

/// The Vietnamese lunisolar calendar: Chinese month structure observed at
/// the Hanoi meridian. UTC+8 until the 1968 switch to UTC+7.
#[derive(Debug, Default, PartialEq, Eq)]
struct Vietnamese;

impl ChineseBased for Vietnamese {
    fn utc_offset(fixed: RataDie) -> f64 {
        if fixed < const { fixed_from_gregorian(1968, 1, 1) } {
            8.0 / 24.0
        } else {
            7.0 / 24.0
        }
    }

    const EPOCH: RataDie = fixed_from_gregorian(-2636, 2, 15);
    const DEBUG_NAME: &'static str = "vietnamese";
}

/// Gregorian year addressed by a sexagenary (cycle, year-of-cycle) pair.
///
/// Cycle 78, year 38 is Gregorian 2021. The caller is responsible for
/// `year_of_cycle` being 1..=60.
#[must_use]
pub const fn sexagenary_gregorian_year(cycle: i32, year_of_cycle: u32) -> i32 {
    -2697 + cycle * 60 + year_of_cycle as i32
}

/// Converts a lunisolar date to Gregorian.
///
/// `gregorian_year` anchors the lunar year whose new year falls early in
/// that Gregorian year. The month is the traditional month number with an
/// explicit leap flag; `None` when the requested leap month does not
/// exist that year or the day exceeds the month length. Day 0 addresses
/// the eve of the month (the last day of the preceding one).
#[must_use]
pub fn lunar_to_gregorian(
    kind: EastAsianKind,
    gregorian_year: i32,
    month: u32,
    leap_month: bool,
    day: u32,
) -> Option<NaiveDate> {
    match kind {
        EastAsianKind::Chinese => lunar_date::<Chinese>(gregorian_year, month, leap_month, day),
        EastAsianKind::Korean => lunar_date::<Dangi>(gregorian_year, month, leap_month, day),
        EastAsianKind::Vietnamese => {
            lunar_date::<Vietnamese>(gregorian_year, month, leap_month, day)
        }
    }
}

fn lunar_date<C: ChineseBased>(
    gregorian_year: i32,
    month: u32,
    leap_month: bool,
    day: u32,
) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || day > 30 {
        return None;
    }
    // July 1 is always inside the lunar year that began in Jan/Feb.
    let mid_year = fixed_from_gregorian(gregorian_year, 7, 1);
    let bounds = YearBounds::compute::<C>(mid_year);
    let (_, leap_ordinal) = month_structure_for_year::<C>(bounds.new_year, bounds.next_new_year);

    // Ordinal position of the requested month among the year's 12 or 13
    // months. A leap month repeats the number of the month before it.
    let month = u8::try_from(month).ok()?;
    let ordinal = if leap_month {
        match leap_ordinal {
            Some(leap) if leap == month + 1 => leap,
            _ => return None,
        }
    } else {
        match leap_ordinal {
            Some(leap) if month >= leap => month + 1,
            _ => month,
        }
    };

    let to_month = i64::from(days_until_month::<C>(bounds.new_year, ordinal));
    if day == 0 {
        return date_from_fixed(bounds.new_year + (to_month - 1));
    }
    let (month_len, _) = days_in_month::<C>(ordinal, bounds.new_year, None);
    if day > u32::from(month_len) {
        return None;
    }
    date_from_fixed(bounds.new_year + (to_month + i64::from(day) - 1))
}

/// Start anchors of the 24 solar terms, `(month, day)`, beginning with
/// Lichun (early February).
const SOLAR_TERM_ANCHORS: [(u32, u32); 24] = [
    (2, 4),
    (2, 19),
    (3, 6),
    (3, 21),
    (4, 5),
    (4, 20),
    (5, 6),
    (5, 21),
    (6, 6),
    (6, 21),
    (7, 7),
    (7, 23),
    (8, 8),
    (8, 23),
    (9, 8),
    (9, 23),
    (10, 8),
    (10, 23),
    (11, 7),
    (11, 22),
    (12, 7),
    (12, 22),
    (1, 6),
    (1, 20),
];

/// Date of the `term_day`-th day (1..=15) of the `term`-th solar term
/// (1..=24) in the given Gregorian year, rolling into the next month or
/// year when the anchor arithmetic spills past month end.
#[must_use]
pub fn solar_term_date(term: u32, term_day: u32, year: i32) -> Option<NaiveDate> {
    if !(1..=24).contains(&term) || !(1..=15).contains(&term_day) {
        return None;
    }
    let (mut month, anchor_day) = SOLAR_TERM_ANCHORS[term as usize - 1];
    let mut year = year;
    let mut day = anchor_day + term_day - 1;

    let month_len = days_in_gregorian_month(year, month)?;
    if day > month_len {
        day %= month_len;
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_gregorian_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sexagenary_anchor() {
        assert_eq!(sexagenary_gregorian_year(78, 38), 2021);
        assert_eq!(sexagenary_gregorian_year(78, 1), 1984);
    }

    #[test]
    fn lunar_month_six_of_2021() {
        for kind in [
            EastAsianKind::Chinese,
            EastAsianKind::Korean,
            EastAsianKind::Vietnamese,
        ] {
            assert_eq!(
                lunar_to_gregorian(kind, 2021, 6, false, 18),
                Some(ymd(2021, 7, 27)),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn chinese_new_year() {
        assert_eq!(
            lunar_to_gregorian(EastAsianKind::Chinese, 2021, 1, false, 1),
            Some(ymd(2021, 2, 12))
        );
        // Day 0 is the eve of the month.
        assert_eq!(
            lunar_to_gregorian(EastAsianKind::Chinese, 2021, 1, false, 0),
            Some(ymd(2021, 2, 11))
        );
    }

    #[test]
    fn leap_month_handling() {
        // 2020 has a leap fourth month; 2021 has no leap month at all.
        assert!(lunar_to_gregorian(EastAsianKind::Chinese, 2020, 4, true, 1).is_some());
        assert_eq!(lunar_to_gregorian(EastAsianKind::Chinese, 2021, 4, true, 1), None);
        assert_eq!(lunar_to_gregorian(EastAsianKind::Chinese, 2020, 7, true, 1), None);
    }

    #[test]
    fn solar_terms() {
        // Fifth term (Qingming), first day.
        assert_eq!(solar_term_date(5, 1, 2021), Some(ymd(2021, 4, 5)));
        // Spill into the following month.
        assert_eq!(solar_term_date(2, 15, 2021), Some(ymd(2021, 3, 5)));
        // 23rd term anchors in January.
        assert_eq!(solar_term_date(23, 1, 2021), Some(ymd(2021, 1, 6)));
        assert_eq!(solar_term_date(25, 1, 2021), None);
        assert_eq!(solar_term_date(5, 16, 2021), None);
    }
}
