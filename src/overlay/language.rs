//! System language codes shared by the PlayStation schemas.
//!
//! The numbering is the system software's language index; the PS3 stores
//! it in `LANG`. Newer platforms extend the list, older ones understand a
//! prefix of it.

use std::fmt;

use crate::Error;

/// A system language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Language {
    Japanese = 0,
    English = 1,
    French = 2,
    Spanish = 3,
    German = 4,
    Italian = 5,
    Dutch = 6,
    Portuguese = 7,
    Russian = 8,
    Korean = 9,
    ChineseTraditional = 10,
    ChineseSimplified = 11,
    Finnish = 12,
    Swedish = 13,
    Danish = 14,
    Norwegian = 15,
    Polish = 16,
    PortugueseBrazil = 17,
    EnglishUnitedKingdom = 18,
    Turkish = 19,
    SpanishLatinAmerica = 20,
    Arabic = 21,
    FrenchCanada = 22,
    Czech = 23,
    Hungarian = 24,
    Greek = 25,
    Romanian = 26,
    Thai = 27,
    Vietnamese = 28,
    Indonesian = 29,
    Ukrainian = 30,
}

impl Language {
    /// Every language, in index order.
    pub const ALL: [Self; 31] = [
        Self::Japanese,
        Self::English,
        Self::French,
        Self::Spanish,
        Self::German,
        Self::Italian,
        Self::Dutch,
        Self::Portuguese,
        Self::Russian,
        Self::Korean,
        Self::ChineseTraditional,
        Self::ChineseSimplified,
        Self::Finnish,
        Self::Swedish,
        Self::Danish,
        Self::Norwegian,
        Self::Polish,
        Self::PortugueseBrazil,
        Self::EnglishUnitedKingdom,
        Self::Turkish,
        Self::SpanishLatinAmerica,
        Self::Arabic,
        Self::FrenchCanada,
        Self::Czech,
        Self::Hungarian,
        Self::Greek,
        Self::Romanian,
        Self::Thai,
        Self::Vietnamese,
        Self::Indonesian,
        Self::Ukrainian,
    ];

    /// The numeric index stored on disk.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// English display name.
    pub fn description(self) -> &'static str {
        match self {
            Self::Japanese => "Japanese",
            Self::English => "English (United States)",
            Self::French => "French",
            Self::Spanish => "Spanish (Spain)",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Dutch => "Dutch",
            Self::Portuguese => "Portuguese (Portugal)",
            Self::Russian => "Russian",
            Self::Korean => "Korean",
            Self::ChineseTraditional => "Chinese (Traditional)",
            Self::ChineseSimplified => "Chinese (Simplified)",
            Self::Finnish => "Finnish",
            Self::Swedish => "Swedish",
            Self::Danish => "Danish",
            Self::Norwegian => "Norwegian",
            Self::Polish => "Polish",
            Self::PortugueseBrazil => "Portuguese (Brazil)",
            Self::EnglishUnitedKingdom => "English (United Kingdom)",
            Self::Turkish => "Turkish",
            Self::SpanishLatinAmerica => "Spanish (Latin America)",
            Self::Arabic => "Arabic",
            Self::FrenchCanada => "French (Canada)",
            Self::Czech => "Czech",
            Self::Hungarian => "Hungarian",
            Self::Greek => "Greek",
            Self::Romanian => "Romanian",
            Self::Thai => "Thai",
            Self::Vietnamese => "Vietnamese",
            Self::Indonesian => "Indonesian",
            Self::Ukrainian => "Ukrainian",
        }
    }
}

impl TryFrom<u32> for Language {
    type Error = Error;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(v as usize)
            .copied()
            .ok_or(Error::ConstraintViolation {
                key: "LANG".into(),
                reason: "unknown language index",
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, lang) in Language::ALL.iter().enumerate() {
            assert_eq!(lang.index() as usize, i);
        }
    }

    #[test]
    fn index_round_trip() {
        assert_eq!(Language::try_from(1).unwrap(), Language::English);
        assert_eq!(Language::try_from(18).unwrap(), Language::EnglishUnitedKingdom);
        assert!(Language::try_from(31).is_err());
    }
}
