//! Bridge between `calendrical_calculations` fixed dates and chrono.
//!
//! Rata Die day 1 is 0001-01-01, the same origin chrono uses for
//! `num_days_from_ce`, so the two count the same days.

use calendrical_calculations::rata_die::RataDie;
use chrono::{Datelike, NaiveDate};

/// Converts a fixed date to a chrono date. `None` outside chrono's
/// representable range.
#[must_use]
pub fn date_from_fixed(fixed: RataDie) -> Option<NaiveDate> {
    let days = i32::try_from(fixed.to_i64_date()).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Converts a chrono date to a fixed date.
#[must_use]
pub fn fixed_from_date(date: NaiveDate) -> RataDie {
    RataDie::new(i64::from(date.num_days_from_ce()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendrical_calculations::gregorian::fixed_from_gregorian;

    #[test]
    fn agrees_with_gregorian_fixed() {
        let fixed = fixed_from_gregorian(2021, 7, 27);
        let date = date_from_fixed(fixed).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 7, 27).unwrap());
        assert_eq!(fixed_from_date(date), fixed);
    }

    #[test]
    fn round_trips_the_epoch() {
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(fixed_from_date(date).to_i64_date(), 1);
        assert_eq!(date_from_fixed(RataDie::new(1)), Some(date));
    }
}
