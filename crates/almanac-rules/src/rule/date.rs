//! The raw, unshifted date a rule is anchored on.
//!
//! One closed enum covers every supported calendar system; each variant
//! holds only the calendar-specific raw fields, and resolution to a
//! proleptic-Gregorian date-time is a pure function of the variant plus
//! the caller's default year. Field ranges are checked at construction:
//! an out-of-range month or cycle position is malformed rule data, not a
//! date that happens to be absent this year.

use almanac_cal::{EastAsianKind, astro, bengali, east_asian, easter, gregorian, hebrew, hijri};
use almanac_core::{Weekday, ZoneSpec};
use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::months::{HebrewMonth, HijriMonth};

/// A calendar field outside its documented range. Signals corrupt or
/// hand-built rule data; never produced by year-to-year evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} out of range: {value}")]
pub struct DateFieldError {
    pub field: &'static str,
    pub value: i64,
}

impl DateFieldError {
    const fn new(field: &'static str, value: i64) -> Self {
        Self { field, value }
    }
}

/// A sexagenary-cycle year designation (cycle number plus 1-based year
/// within the 60-year cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexagenaryYear {
    pub cycle: i32,
    pub year_of_cycle: u32,
}

/// The raw date of a rule, in whichever calendar the rule names.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarDate {
    Gregorian {
        year: Option<i32>,
        month: u32,
        day: u32,
    },
    Easter {
        year: Option<i32>,
        orthodox: bool,
        offset_days: i32,
    },
    Hijri {
        year: Option<i32>,
        month: HijriMonth,
        day: u32,
    },
    Hebrew {
        year: Option<i32>,
        month: HebrewMonth,
        day: u32,
    },
    BengaliRevised {
        year: Option<i32>,
        month: u32,
        day: u32,
    },
    EastAsianLunar {
        kind: EastAsianKind,
        cycle: Option<SexagenaryYear>,
        month: u32,
        leap_month: bool,
        day: u32,
    },
    EastAsianSolarTerm {
        kind: EastAsianKind,
        cycle: Option<SexagenaryYear>,
        term: u32,
        term_day: u32,
    },
    Equinox {
        year: Option<i32>,
        month: u32,
        zone: ZoneSpec,
    },
    Solstice {
        year: Option<i32>,
        month: u32,
        zone: ZoneSpec,
    },
    NthWeekday {
        year: Option<i32>,
        month: u32,
        weekday: Weekday,
        nth: u32,
        before_month: bool,
    },
}

impl CalendarDate {
    /// A Gregorian date; `month` 1..=12, `day` 1..=31.
    pub fn gregorian(year: Option<i32>, month: u32, day: u32) -> Result<Self, DateFieldError> {
        check_range("month", month, 1, 12)?;
        check_range("day", day, 1, 31)?;
        Ok(Self::Gregorian { year, month, day })
    }

    /// Easter or Orthodox Easter, shifted by a signed day offset.
    #[must_use]
    pub const fn easter(year: Option<i32>, orthodox: bool, offset_days: i32) -> Self {
        Self::Easter {
            year,
            orthodox,
            offset_days,
        }
    }

    /// A Hijri date; `day` 1..=30.
    pub fn hijri(year: Option<i32>, month: HijriMonth, day: u32) -> Result<Self, DateFieldError> {
        check_range("day", day, 1, 30)?;
        Ok(Self::Hijri { year, month, day })
    }

    /// A Hebrew date; `day` 1..=30.
    pub fn hebrew(year: Option<i32>, month: HebrewMonth, day: u32) -> Result<Self, DateFieldError> {
        check_range("day", day, 1, 30)?;
        Ok(Self::Hebrew { year, month, day })
    }

    /// A Bengali-revised date; `month` 1..=12, `day` 1..=31.
    pub fn bengali_revised(
        year: Option<i32>,
        month: u32,
        day: u32,
    ) -> Result<Self, DateFieldError> {
        check_range("month", month, 1, 12)?;
        check_range("day", day, 1, 31)?;
        Ok(Self::BengaliRevised { year, month, day })
    }

    /// An East-Asian lunisolar date; `month` 1..=12, `day` 0..=30 (0 is
    /// the eve of the month), `year_of_cycle` 1..=60 when given.
    pub fn east_asian_lunar(
        kind: EastAsianKind,
        cycle: Option<SexagenaryYear>,
        month: u32,
        leap_month: bool,
        day: u32,
    ) -> Result<Self, DateFieldError> {
        check_cycle(cycle)?;
        check_range("month", month, 1, 12)?;
        check_range("day", day, 0, 30)?;
        Ok(Self::EastAsianLunar {
            kind,
            cycle,
            month,
            leap_month,
            day,
        })
    }

    /// An East-Asian solar-term date; `term` 1..=24, `term_day` 1..=15.
    pub fn east_asian_solar_term(
        kind: EastAsianKind,
        cycle: Option<SexagenaryYear>,
        term: u32,
        term_day: u32,
    ) -> Result<Self, DateFieldError> {
        check_cycle(cycle)?;
        check_range("solar term", term, 1, 24)?;
        check_range("solar term day", term_day, 1, 15)?;
        Ok(Self::EastAsianSolarTerm {
            kind,
            cycle,
            term,
            term_day,
        })
    }

    /// A March or September equinox.
    pub fn equinox(year: Option<i32>, month: u32, zone: ZoneSpec) -> Result<Self, DateFieldError> {
        if month != 3 && month != 9 {
            return Err(DateFieldError::new("equinox month", i64::from(month)));
        }
        Ok(Self::Equinox { year, month, zone })
    }

    /// A June or December solstice.
    pub fn solstice(year: Option<i32>, month: u32, zone: ZoneSpec) -> Result<Self, DateFieldError> {
        if month != 6 && month != 12 {
            return Err(DateFieldError::new("solstice month", i64::from(month)));
        }
        Ok(Self::Solstice { year, month, zone })
    }

    /// The nth weekday within (or, with `before_month`, counting back
    /// from the start of) a Gregorian month; `nth` 1..=5.
    pub fn nth_weekday(
        year: Option<i32>,
        month: u32,
        weekday: Weekday,
        nth: u32,
        before_month: bool,
    ) -> Result<Self, DateFieldError> {
        check_range("month", month, 1, 12)?;
        check_range("nth", nth, 1, 5)?;
        Ok(Self::NthWeekday {
            year,
            month,
            weekday,
            nth,
            before_month,
        })
    }

    /// Resolves the raw date against a default Gregorian year.
    ///
    /// Non-astronomical variants resolve at midnight; the equinox and
    /// solstice variants carry the event's clock time in the variant's
    /// zone. `None` when the date does not exist in the addressed year.
    #[must_use]
    pub fn resolve(&self, default_year: i32) -> Option<NaiveDateTime> {
        let midnight = NaiveTime::MIN;
        match *self {
            Self::Gregorian { year, month, day } => {
                let year = year.unwrap_or(default_year);
                Some(chrono::NaiveDate::from_ymd_opt(year, month, day)?.and_time(midnight))
            }
            Self::Easter {
                year,
                orthodox,
                offset_days,
            } => {
                let year = year.unwrap_or(default_year);
                let sunday = if orthodox {
                    easter::orthodox_easter(year)?
                } else {
                    easter::easter_sunday(year)?
                };
                gregorian::shift_days(sunday.and_time(midnight), i64::from(offset_days))
            }
            Self::Hijri { year, month, day } => {
                let year = year.unwrap_or_else(|| hijri::default_hijri_year(default_year));
                Some(hijri::hijri_to_gregorian(year, month.number(), day)?.and_time(midnight))
            }
            Self::Hebrew { year, month, day } => {
                let year = year.unwrap_or_else(|| hebrew::default_hebrew_year(default_year));
                Some(hebrew::hebrew_to_gregorian(year, month.number(), day)?.and_time(midnight))
            }
            Self::BengaliRevised { year, month, day } => {
                let year = year.unwrap_or_else(|| bengali::default_bengali_year(default_year));
                Some(bengali::bengali_to_gregorian(year, month, day)?.and_time(midnight))
            }
            Self::EastAsianLunar {
                kind,
                cycle,
                month,
                leap_month,
                day,
            } => {
                let year = gregorian_anchor_year(cycle, default_year);
                Some(
                    east_asian::lunar_to_gregorian(kind, year, month, leap_month, day)?
                        .and_time(midnight),
                )
            }
            Self::EastAsianSolarTerm {
                kind: _,
                cycle,
                term,
                term_day,
            } => {
                let year = gregorian_anchor_year(cycle, default_year);
                Some(east_asian::solar_term_date(term, term_day, year)?.and_time(midnight))
            }
            Self::Equinox { year, month, zone } => {
                let year = year.unwrap_or(default_year);
                Some(zone.from_gmt(astro::equinox_utc(year, month)?))
            }
            Self::Solstice { year, month, zone } => {
                let year = year.unwrap_or(default_year);
                Some(zone.from_gmt(astro::solstice_utc(year, month)?))
            }
            Self::NthWeekday {
                year,
                month,
                weekday,
                nth,
                before_month,
            } => {
                let year = year.unwrap_or(default_year);
                let date = if before_month {
                    gregorian::nth_weekday_before_month(year, month, weekday, nth)?
                } else {
                    gregorian::nth_weekday_in_month(year, month, weekday, nth)?
                };
                Some(date.and_time(midnight))
            }
        }
    }
}

fn gregorian_anchor_year(cycle: Option<SexagenaryYear>, default_year: i32) -> i32 {
    cycle.map_or(default_year, |c| {
        east_asian::sexagenary_gregorian_year(c.cycle, c.year_of_cycle)
    })
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), DateFieldError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DateFieldError::new(field, i64::from(value)))
    }
}

fn check_cycle(cycle: Option<SexagenaryYear>) -> Result<(), DateFieldError> {
    match cycle {
        Some(c) => check_range("year of cycle", c.year_of_cycle, 1, 60),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn construction_checks_ranges() {
        assert!(CalendarDate::gregorian(None, 13, 1).is_err());
        assert!(CalendarDate::east_asian_solar_term(EastAsianKind::Chinese, None, 25, 1).is_err());
        assert!(CalendarDate::east_asian_solar_term(EastAsianKind::Chinese, None, 5, 16).is_err());
        assert!(
            CalendarDate::east_asian_lunar(
                EastAsianKind::Chinese,
                Some(SexagenaryYear {
                    cycle: 78,
                    year_of_cycle: 61
                }),
                6,
                false,
                18,
            )
            .is_err()
        );
        assert!(CalendarDate::equinox(None, 4, ZoneSpec::Gmt).is_err());
        assert!(CalendarDate::solstice(None, 3, ZoneSpec::Gmt).is_err());
    }

    #[test]
    fn explicit_year_wins_over_default() {
        let date = CalendarDate::gregorian(Some(2015), 7, 24).unwrap();
        assert_eq!(date.resolve(2021).unwrap().date(), ymd(2015, 7, 24));
        let date = CalendarDate::gregorian(None, 7, 24).unwrap();
        assert_eq!(date.resolve(2021).unwrap().date(), ymd(2021, 7, 24));
    }

    #[test]
    fn easter_variants_resolve() {
        let date = CalendarDate::easter(None, false, 0);
        assert_eq!(date.resolve(2021).unwrap().date(), ymd(2021, 4, 4));
        let date = CalendarDate::easter(None, true, 0);
        assert_eq!(date.resolve(2021).unwrap().date(), ymd(2021, 5, 2));
        let date = CalendarDate::easter(None, false, 49);
        assert_eq!(date.resolve(2021).unwrap().date(), ymd(2021, 5, 23));
    }

    #[test]
    fn nonexistent_dates_resolve_to_none() {
        let date = CalendarDate::gregorian(None, 2, 30).unwrap();
        assert_eq!(date.resolve(2021), None);
        let date = CalendarDate::bengali_revised(Some(1400), 1, 1).unwrap();
        assert_eq!(date.resolve(2021), None);
    }

    #[test]
    fn astronomical_dates_carry_time() {
        let date = CalendarDate::equinox(None, 3, ZoneSpec::Gmt).unwrap();
        let resolved = date.resolve(2021).unwrap();
        assert_eq!(resolved.date(), ymd(2021, 3, 20));
        assert_eq!(resolved.time(), chrono::NaiveTime::from_hms_opt(9, 35, 0).unwrap());
    }
}
