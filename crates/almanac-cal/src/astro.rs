//! Equinox and solstice instants.
//!
//! The mean-event JDE polynomials (Meeus, Astronomical Algorithms ch. 27)
//! give the event instant to within a day of the apparent event, which is
//! the accuracy the holiday data asks for. The JDE is converted to a
//! Gregorian date-time at GMT; zone conversion is the caller's business.

use chrono::{NaiveDate, NaiveDateTime};

/// March (month 3) or September (month 9) equinox of `year`, at GMT.
#[must_use]
pub fn equinox_utc(year: i32, month: u32) -> Option<NaiveDateTime> {
    let m = f64::from(year - 2000) / 1000.0;
    let (m2, m3, m4) = (m * m, m * m * m, m * m * m * m);
    let jde = match month {
        3 => 2_451_623.809_84 + 365_242.374_04 * m + 0.051_69 * m2 - 0.004_11 * m3 - 0.000_57 * m4,
        9 => 2_451_810.217_15 + 365_242.017_67 * m - 0.115_75 * m2 + 0.003_37 * m3 + 0.000_78 * m4,
        _ => return None,
    };
    jde_to_datetime(jde)
}

/// June (month 6) or December (month 12) solstice of `year`, at GMT.
#[must_use]
pub fn solstice_utc(year: i32, month: u32) -> Option<NaiveDateTime> {
    let m = f64::from(year - 2000) / 1000.0;
    let (m2, m3, m4) = (m * m, m * m * m, m * m * m * m);
    let jde = match month {
        6 => 2_451_716.567_67 + 365_241.626_03 * m + 0.003_25 * m2 + 0.008_88 * m3 - 0.000_30 * m4,
        12 => 2_451_900.059_52 + 365_242.740_49 * m - 0.062_23 * m2 - 0.008_23 * m3 + 0.000_32 * m4,
        _ => return None,
    };
    jde_to_datetime(jde)
}

/// Converts a Julian Ephemeris Day to a Gregorian date-time (GMT),
/// truncated to the minute.
#[must_use]
pub fn jde_to_datetime(jde: f64) -> Option<NaiveDateTime> {
    let p = (jde + 0.5).floor();
    let s1 = p + 68_569.0;
    let n = (4.0 * s1 / 146_097.0).floor();
    let s2 = s1 - ((146_097.0 * n + 3.0) / 4.0).floor();
    let i = (4000.0 * (s2 + 1.0) / 1_461_001.0).floor();
    let s3 = s2 - (1461.0 * i / 4.0).floor() + 31.0;
    let q = (80.0 * s3 / 2447.0).floor();
    let e = s3 - (2447.0 * q / 80.0).floor();
    let s4 = (q / 11.0).floor();

    let month = q + 2.0 - 12.0 * s4;
    let year = 100.0 * (n - 49.0) + i + s4;
    let day_f = e + jde - p + 0.5;

    let mut t = 24.0 * (day_f - day_f.floor());
    let hour = t.floor();
    t = 60.0 * (t - hour);
    let minute = t.floor();

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day_f as u32)?;
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (hour, minute) = (hour as u32, minute as u32);
    date.and_hms_opt(hour, minute, 0)
}
