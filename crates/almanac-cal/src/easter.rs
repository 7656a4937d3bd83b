//! Easter and Orthodox Easter.

use chrono::NaiveDate;

/// Easter Sunday of the given Gregorian year, by the Meeus/Jones/Butcher
/// ("anonymous Gregorian") algorithm.
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Orthodox Easter of the given Gregorian year (Julian computus plus the
/// 13-day calendar gap, so only meaningful for 1900..=2099).
#[must_use]
pub fn orthodox_easter(year: i32) -> Option<NaiveDate> {
    let r1 = year.rem_euclid(4);
    let r2 = year.rem_euclid(7);
    let r3 = year.rem_euclid(19);
    let r4 = (19 * r3 + 15) % 30;
    let r5 = (2 * r1 + 4 * r2 + 6 * r4 + 6) % 7;
    let days = r5 + r4 + 13;

    let (month, day) = if days > 39 {
        (5, days - 39)
    } else if days > 9 {
        (4, days - 9)
    } else {
        (3, days + 22)
    };
    NaiveDate::from_ymd_opt(year, month, u32::try_from(day).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_reference_years() {
        assert_eq!(easter_sunday(2021), Some(ymd(2021, 4, 4)));
        assert_eq!(easter_sunday(2020), Some(ymd(2020, 4, 12)));
        assert_eq!(easter_sunday(2023), Some(ymd(2023, 4, 9)));
        // March Easter.
        assert_eq!(easter_sunday(2024), Some(ymd(2024, 3, 31)));
    }

    #[test]
    fn orthodox_reference_years() {
        assert_eq!(orthodox_easter(2021), Some(ymd(2021, 5, 2)));
        assert_eq!(orthodox_easter(2020), Some(ymd(2020, 4, 19)));
        assert_eq!(orthodox_easter(2023), Some(ymd(2023, 4, 16)));
    }
}
