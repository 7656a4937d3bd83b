//! Minute-of-day arithmetic.
//!
//! Rule start times and time-of-day substitutions are expressed as minutes
//! from midnight, 0 through 1439 (a day cannot carry a 24:00 time).

use chrono::NaiveTime;

/// A clock time expressed as minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIN: Self = Self(0);
    /// 23:59. The last representable minute of a day.
    pub const MAX: Self = Self(24 * 60 - 1);

    /// Builds a `MinuteOfDay` from minutes from midnight, rejecting values
    /// past 23:59.
    #[must_use]
    pub const fn new(minutes: u32) -> Option<Self> {
        if minutes <= Self::MAX.0 as u32 {
            Some(Self(minutes as u16))
        } else {
            None
        }
    }

    /// Builds a `MinuteOfDay` from an hour/minute pair.
    #[must_use]
    pub const fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Self::new(hour * 60 + minute)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0 as u32
    }

    #[must_use]
    pub fn to_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.0) / 60, u32::from(self.0) % 60, 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl Default for MinuteOfDay {
    fn default() -> Self {
        Self::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(MinuteOfDay::new(0), Some(MinuteOfDay::MIN));
        assert_eq!(MinuteOfDay::new(1439), Some(MinuteOfDay::MAX));
        assert_eq!(MinuteOfDay::new(1440), None);
    }

    #[test]
    fn from_hour_and_minute() {
        assert_eq!(MinuteOfDay::from_hm(14, 30).unwrap().minutes(), 870);
        assert_eq!(MinuteOfDay::from_hm(24, 0), None);
        assert_eq!(MinuteOfDay::from_hm(23, 60), None);
    }

    #[test]
    fn converts_to_naive_time() {
        let t = MinuteOfDay::from_hm(9, 35).unwrap().to_time();
        assert_eq!(t, NaiveTime::from_hms_opt(9, 35, 0).unwrap());
        assert_eq!(
            MinuteOfDay::MAX.to_time(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }
}
