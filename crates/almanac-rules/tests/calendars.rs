//! End-to-end reference dates for every calendar family, evaluated
//! against default year 2021.

use almanac_rules::parse;
use chrono::{NaiveDate, NaiveDateTime};

fn date(input: &str) -> NaiveDate {
    parse(input)
        .unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"))
        .calculate_date(2021)
        .unwrap_or_else(|| panic!("no date for {input:?}"))
}

fn datetime(input: &str) -> NaiveDateTime {
    parse(input)
        .unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"))
        .calculate(2021)
        .unwrap_or_else(|| panic!("no datetime for {input:?}"))
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    ymd(y, mo, d).and_hms_opt(h, mi, 0).unwrap()
}

#[test_log::test]
fn gregorian_dates() {
    assert_eq!(date("2021-05-01"), ymd(2021, 5, 1));
    assert_eq!(date("05-01"), ymd(2021, 5, 1));
    assert_eq!(date("2015-07-24"), ymd(2015, 7, 24));
}

#[test_log::test]
fn month_names_mean_the_first() {
    assert_eq!(date("january"), ymd(2021, 1, 1));
    assert_eq!(date("March"), ymd(2021, 3, 1));
}

#[test_log::test]
fn easter_and_orthodox() {
    assert_eq!(date("easter"), ymd(2021, 4, 4));
    assert_eq!(date("orthodox"), ymd(2021, 5, 2));
    assert_eq!(date("easter -2"), ymd(2021, 4, 2));
    assert_eq!(date("orthodox 3"), ymd(2021, 5, 5));
    assert_eq!(date("easter +49"), ymd(2021, 5, 23));
    assert_eq!(date("orthodox -6"), ymd(2021, 4, 26));
}

#[test_log::test]
fn hijri_dates() {
    assert_eq!(date("29 Muharram"), ymd(2020, 9, 17));
    assert_eq!(date("28 Rabi al-awwal"), ymd(2020, 11, 14));
    assert_eq!(date("26 Jumada al-awwal"), ymd(2021, 1, 10));
    assert_eq!(date("21 Rajab"), ymd(2021, 3, 5));
    assert_eq!(date("9 Ramadan"), ymd(2021, 4, 21));
    assert_eq!(date("10 Shawwal"), ymd(2021, 5, 22));
    assert_eq!(date("11 Dhu al-Qidah"), ymd(2021, 6, 21));
    assert_eq!(date("17 Dhu al-Hijjah"), ymd(2021, 7, 27));
}

#[test_log::test]
fn hebrew_dates() {
    assert_eq!(date("1 Nisan"), ymd(2021, 3, 14));
    assert_eq!(date("2 Iyyar"), ymd(2021, 4, 14));
    assert_eq!(date("3 Sivan"), ymd(2021, 5, 14));
    assert_eq!(date("10 Tamuz"), ymd(2021, 6, 20));
    assert_eq!(date("11 Av"), ymd(2021, 7, 20));
    assert_eq!(date("12 Elul"), ymd(2021, 8, 20));
    assert_eq!(date("24 Tishrei"), ymd(2020, 10, 12));
    assert_eq!(date("25 Kislev"), ymd(2020, 12, 11));
    assert_eq!(date("26 Tevet"), ymd(2021, 1, 10));
    assert_eq!(date("27 Shvat"), ymd(2021, 2, 9));
    assert_eq!(date("28 Adar"), ymd(2021, 3, 12));
}

#[test_log::test]
fn east_asian_lunar_dates() {
    assert_eq!(date("chinese 6-0-18"), ymd(2021, 7, 27));
    assert_eq!(date("chinese 78-38-6-0-18"), ymd(2021, 7, 27));
    assert_eq!(date("korean 6-0-18"), ymd(2021, 7, 27));
    assert_eq!(date("korean 78-38-6-0-18"), ymd(2021, 7, 27));
    assert_eq!(date("vietnamese 6-0-18"), ymd(2021, 7, 27));
    assert_eq!(date("vietnamese 78-38-6-0-18"), ymd(2021, 7, 27));
}

#[test_log::test]
fn east_asian_solar_terms() {
    assert_eq!(date("chinese 5-01 solarterm"), ymd(2021, 4, 5));
    assert_eq!(date("chinese 78-38-5-01 solarterm"), ymd(2021, 4, 5));
}

#[test_log::test]
fn bengali_revised_dates() {
    assert_eq!(date("bengali-revised 11-9"), ymd(2022, 2, 23));
    assert_eq!(date("bengali-revised 1428-11-9"), ymd(2022, 2, 23));
    assert_eq!(date("bengali-revised 4-31"), ymd(2021, 8, 16));
}

#[test_log::test]
fn equinoxes() {
    assert_eq!(datetime("march equinox"), at(2021, 3, 20, 9, 35));
    assert_eq!(datetime("march equinox in -12:00"), at(2021, 3, 19, 21, 35));
    assert_eq!(datetime("march equinox in Asia/Tokyo"), at(2021, 3, 20, 18, 35));
    assert_eq!(
        datetime("5 days before september equinox"),
        at(2021, 9, 17, 19, 11)
    );
}

#[test_log::test]
fn solstices() {
    assert_eq!(datetime("december solstice"), at(2021, 12, 21, 15, 46));
    assert_eq!(
        datetime("3rd Sunday after june solstice"),
        at(2021, 7, 11, 3, 24)
    );
    assert_eq!(
        datetime("3rd Sunday after june solstice in -05:00"),
        at(2021, 7, 11, 22, 24)
    );
}

#[test_log::test]
fn explicit_start_times() {
    assert_eq!(datetime("12-31 14:00"), at(2021, 12, 31, 14, 0));
    assert_eq!(
        datetime("5 days before september equinox 15:00"),
        at(2021, 9, 17, 15, 0)
    );
    assert_eq!(datetime("december solstice 16:00"), at(2021, 12, 21, 16, 0));
    assert_eq!(
        datetime("bengali-revised 1428-11-9 17:00"),
        at(2022, 2, 23, 17, 0)
    );
    assert_eq!(
        datetime("chinese 78-38-5-01 solarterm 18:00"),
        at(2021, 4, 5, 18, 0)
    );
    assert_eq!(datetime("27 Shvat 19:00"), at(2021, 2, 9, 19, 0));
    assert_eq!(datetime("17 Dhu al-Hijjah 20:00"), at(2021, 7, 27, 20, 0));
    assert_eq!(datetime("orthodox 21:00"), at(2021, 5, 2, 21, 0));
    assert_eq!(datetime("january 22:00"), at(2021, 1, 1, 22, 0));
    assert_eq!(datetime("2015-07-24 23:00"), at(2015, 7, 24, 23, 0));
    assert_eq!(datetime("07-24 00:00"), at(2021, 7, 24, 0, 0));
}

#[test_log::test]
fn weekday_shifted_dates() {
    assert_eq!(date("1st Monday after 2021-08-01"), ymd(2021, 8, 2));
    assert_eq!(date("1st Monday after 08-01"), ymd(2021, 8, 2));
    assert_eq!(date("Monday after 08-01"), ymd(2021, 8, 2));
    assert_eq!(date("Saturday before 08-01"), ymd(2021, 7, 31));
    assert_eq!(date("2nd saturday before 08-01"), ymd(2021, 7, 24));
    assert_eq!(date("2nd Saturday before 2021-08-01"), ymd(2021, 7, 24));
}

#[test_log::test]
fn nth_weekday_of_month_dates() {
    assert_eq!(date("1st Monday in July"), ymd(2021, 7, 5));
    assert_eq!(date("2nd Sunday in August"), ymd(2021, 8, 8));
    assert_eq!(date("2nd Sunday before August"), ymd(2021, 7, 18));
    assert_eq!(date("3rd Monday before August"), ymd(2021, 7, 12));
}

#[test_log::test]
fn default_year_fallback_tracks_the_argument() {
    let rule = parse("05-01").unwrap();
    assert_eq!(rule.calculate_date(2020), Some(ymd(2020, 5, 1)));
    assert_eq!(rule.calculate_date(2021), Some(ymd(2021, 5, 1)));
    // Explicit years ignore the default entirely.
    let rule = parse("2015-07-24").unwrap();
    assert_eq!(rule.calculate_date(2021), Some(ymd(2015, 7, 24)));
}

#[test_log::test]
fn evaluation_is_pure_and_shareable() {
    let rule = parse("easter +49").unwrap();
    let first = rule.calculate(2021);
    assert_eq!(rule.calculate(2021), first);

    std::thread::scope(|scope| {
        for year in [2020, 2021, 2022, 2023] {
            let rule = &rule;
            scope.spawn(move || {
                assert_eq!(rule.calculate(year), rule.calculate(year));
            });
        }
    });
}
