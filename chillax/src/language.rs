//! City to language resolution.
//!
//! The language picks the keyword set for the video search, the region the
//! search is biased towards, and the language of the weather description.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Languages the suggestion tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese.
    Ja,
    /// English.
    En,
    /// Korean.
    Ko,
    /// Chinese.
    Zh,
}

impl Language {
    /// Language used for unknown cities and for missing table entries.
    pub const DEFAULT: Language = Language::En;

    /// Every supported language.
    pub const ALL: [Language; 4] = [Language::Ja, Language::En, Language::Ko, Language::Zh];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
            Self::Ko => "ko",
            Self::Zh => "zh",
        }
    }

    /// ISO 3166-1 region the video search is biased towards.
    pub fn region_code(self) -> &'static str {
        match self {
            Self::Ja => "JP",
            Self::En => "US",
            Self::Ko => "KR",
            Self::Zh => "TW",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalized city name to language.
static CITY_LANGUAGES: LazyLock<HashMap<&'static str, Language>> = LazyLock::new(|| {
    use Language::*;
    HashMap::from([
        ("tokyo", Ja),
        ("osaka", Ja),
        ("kyoto", Ja),
        ("yokohama", Ja),
        ("nagoya", Ja),
        ("東京", Ja),
        ("大阪", Ja),
        ("京都", Ja),
        ("london", En),
        ("new york", En),
        ("los angeles", En),
        ("chicago", En),
        ("toronto", En),
        ("seoul", Ko),
        ("busan", Ko),
        ("서울", Ko),
        ("beijing", Zh),
        ("shanghai", Zh),
        ("北京", Zh),
        ("上海", Zh),
    ])
});

/// Resolve the language for a city name. Unknown cities get
/// [`Language::DEFAULT`].
pub fn resolve_language(city: &str) -> Language {
    let normalized = normalize_city(city);
    CITY_LANGUAGES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(Language::DEFAULT)
}

/// Trim, lowercase and collapse inner whitespace runs to one space.
fn normalize_city(city: &str) -> String {
    city.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Iterate the static city table.
pub fn known_cities() -> impl Iterator<Item = (&'static str, Language)> {
    CITY_LANGUAGES.iter().map(|(city, lang)| (*city, *lang))
}
