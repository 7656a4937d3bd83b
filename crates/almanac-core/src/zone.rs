//! Timezone specification for astronomical rules.
//!
//! Equinox and solstice instants are computed as GMT wall times and then
//! shifted into the zone the rule names, either a fixed `±HH:MM` offset or
//! an IANA zone such as `Asia/Tokyo`.

use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The zone a rule's result is expressed in. GMT unless the rule says
/// otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZoneSpec {
    #[default]
    Gmt,
    Fixed(FixedOffset),
    Named(Tz),
}

impl ZoneSpec {
    /// Builds a fixed-offset zone from a signed hour/minute pair.
    ///
    /// Returns `None` for offsets chrono cannot represent (beyond ±24h).
    #[must_use]
    pub fn from_offset(negative: bool, hours: u32, minutes: u32) -> Option<Self> {
        let seconds = i32::try_from(hours * 3600 + minutes * 60).ok()?;
        let offset = if negative {
            FixedOffset::west_opt(seconds)?
        } else {
            FixedOffset::east_opt(seconds)?
        };
        Some(Self::Fixed(offset))
    }

    /// Resolves an IANA zone name (`Asia/Tokyo`); `GMT` and `UTC` map to
    /// the GMT zone.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("gmt") || name.eq_ignore_ascii_case("utc") {
            return Some(Self::Gmt);
        }
        name.parse::<Tz>().ok().map(Self::Named)
    }

    /// Reinterprets a GMT wall time as a wall time in this zone.
    #[must_use]
    pub fn from_gmt(self, gmt: NaiveDateTime) -> NaiveDateTime {
        let utc = Utc.from_utc_datetime(&gmt);
        match self {
            Self::Gmt => gmt,
            Self::Fixed(offset) => utc.with_timezone(&offset).naive_local(),
            Self::Named(tz) => utc.with_timezone(&tz).naive_local(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn gmt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn gmt_is_identity() {
        assert_eq!(ZoneSpec::Gmt.from_gmt(gmt(9, 35)), gmt(9, 35));
    }

    #[test]
    fn fixed_offsets_shift_wall_time() {
        let minus12 = ZoneSpec::from_offset(true, 12, 0).unwrap();
        let shifted = minus12.from_gmt(gmt(9, 35));
        assert_eq!(
            shifted,
            NaiveDate::from_ymd_opt(2021, 3, 19)
                .unwrap()
                .and_hms_opt(21, 35, 0)
                .unwrap()
        );
    }

    #[test]
    fn named_zones_resolve() {
        let tokyo = ZoneSpec::from_name("Asia/Tokyo").unwrap();
        let shifted = tokyo.from_gmt(gmt(9, 35));
        assert_eq!(
            shifted,
            NaiveDate::from_ymd_opt(2021, 3, 20)
                .unwrap()
                .and_hms_opt(18, 35, 0)
                .unwrap()
        );
        assert_eq!(ZoneSpec::from_name("GMT"), Some(ZoneSpec::Gmt));
        assert_eq!(ZoneSpec::from_name("Nowhere/Nothing"), None);
    }
}
