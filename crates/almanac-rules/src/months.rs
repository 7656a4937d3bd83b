//! Month name tables for the calendars addressed by name.

use std::fmt;

/// Looks up a Gregorian month number from its English name,
/// case-insensitively.
#[must_use]
pub(crate) fn gregorian_month_from_name(name: &str) -> Option<u32> {
    let number = match name.to_ascii_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(number)
}

/// A month of the Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HijriMonth {
    Muharram,
    Safar,
    RabiAlAwwal,
    RabiAlThani,
    JumadaAlAwwal,
    JumadaAlThani,
    Rajab,
    Shaban,
    Ramadan,
    Shawwal,
    DhuAlQidah,
    DhuAlHijjah,
}

impl HijriMonth {
    /// The month number, 1 (Muharram) through 12 (Dhu al-Hijjah).
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Muharram => 1,
            Self::Safar => 2,
            Self::RabiAlAwwal => 3,
            Self::RabiAlThani => 4,
            Self::JumadaAlAwwal => 5,
            Self::JumadaAlThani => 6,
            Self::Rajab => 7,
            Self::Shaban => 8,
            Self::Ramadan => 9,
            Self::Shawwal => 10,
            Self::DhuAlQidah => 11,
            Self::DhuAlHijjah => 12,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Muharram => "Muharram",
            Self::Safar => "Safar",
            Self::RabiAlAwwal => "Rabi al-awwal",
            Self::RabiAlThani => "Rabi al-thani",
            Self::JumadaAlAwwal => "Jumada al-awwal",
            Self::JumadaAlThani => "Jumada al-thani",
            Self::Rajab => "Rajab",
            Self::Shaban => "Shaban",
            Self::Ramadan => "Ramadan",
            Self::Shawwal => "Shawwal",
            Self::DhuAlQidah => "Dhu al-Qidah",
            Self::DhuAlHijjah => "Dhu al-Hijjah",
        }
    }

    /// Looks up a month from its transliterated name ("Rabi al-awwal",
    /// "Dhu al-Hijjah", ...), case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let month = match name.to_ascii_lowercase().as_str() {
            "muharram" => Self::Muharram,
            "safar" => Self::Safar,
            "rabi al-awwal" => Self::RabiAlAwwal,
            "rabi al-thani" => Self::RabiAlThani,
            "jumada al-awwal" => Self::JumadaAlAwwal,
            "jumada al-thani" => Self::JumadaAlThani,
            "rajab" => Self::Rajab,
            "shaban" => Self::Shaban,
            "ramadan" => Self::Ramadan,
            "shawwal" => Self::Shawwal,
            "dhu al-qidah" => Self::DhuAlQidah,
            "dhu al-hijjah" => Self::DhuAlHijjah,
            _ => return None,
        };
        Some(month)
    }

    /// Whether `word` can open a two-word month name ("Rabi al-awwal").
    #[must_use]
    pub(crate) fn is_name_prefix(word: &str) -> bool {
        matches!(
            word.to_ascii_lowercase().as_str(),
            "rabi" | "jumada" | "dhu"
        )
    }
}

impl fmt::Display for HijriMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A month of the Hebrew calendar, numbered biblically (Nisan = 1).
/// "Adar" is month 12, which is Adar I in leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HebrewMonth {
    Nisan,
    Iyyar,
    Sivan,
    Tamuz,
    Av,
    Elul,
    Tishrei,
    Cheshvan,
    Kislev,
    Tevet,
    Shvat,
    Adar,
}

impl HebrewMonth {
    /// The biblical month number, 1 (Nisan) through 12 (Adar).
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Nisan => 1,
            Self::Iyyar => 2,
            Self::Sivan => 3,
            Self::Tamuz => 4,
            Self::Av => 5,
            Self::Elul => 6,
            Self::Tishrei => 7,
            Self::Cheshvan => 8,
            Self::Kislev => 9,
            Self::Tevet => 10,
            Self::Shvat => 11,
            Self::Adar => 12,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nisan => "Nisan",
            Self::Iyyar => "Iyyar",
            Self::Sivan => "Sivan",
            Self::Tamuz => "Tamuz",
            Self::Av => "Av",
            Self::Elul => "Elul",
            Self::Tishrei => "Tishrei",
            Self::Cheshvan => "Cheshvan",
            Self::Kislev => "Kislev",
            Self::Tevet => "Tevet",
            Self::Shvat => "Shvat",
            Self::Adar => "Adar",
        }
    }

    /// Looks up a month from its transliterated name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let month = match name.to_ascii_lowercase().as_str() {
            "nisan" => Self::Nisan,
            "iyyar" => Self::Iyyar,
            "sivan" => Self::Sivan,
            "tamuz" => Self::Tamuz,
            "av" => Self::Av,
            "elul" => Self::Elul,
            "tishrei" => Self::Tishrei,
            "cheshvan" => Self::Cheshvan,
            "kislev" => Self::Kislev,
            "tevet" => Self::Tevet,
            "shvat" => Self::Shvat,
            "adar" => Self::Adar,
            _ => return None,
        };
        Some(month)
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
