//! Search keywords per weather category and language.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::category::WeatherCategory;
use crate::error::{Result, SuggestionError};
use crate::language::Language;

/// Separator between keywords; `|` is YouTube's OR operator.
pub const KEYWORD_SEPARATOR: &str = " | ";

type KeywordTable = HashMap<(WeatherCategory, Language), &'static [&'static str]>;

static KEYWORDS: LazyLock<KeywordTable> = LazyLock::new(|| {
    use Language::{En, Ja};
    use WeatherCategory::*;

    HashMap::from([
        (
            (Clear, Ja),
            &["アウトドア vlog", "公園 散歩", "ピクニック", "観光地 おすすめ", "サイクリング"][..],
        ),
        (
            (Clear, En),
            &["outdoor activities", "park walking", "picnic ideas", "travel destinations", "cycling vlog"][..],
        ),
        (
            (Cloudy, Ja),
            &["街歩き vlog", "カフェ巡り", "美術館 おすすめ", "ショッピング", "写真 散歩"][..],
        ),
        (
            (Cloudy, En),
            &["city walk vlog", "cafe hopping", "museum tour", "shopping haul", "photo walk"][..],
        ),
        (
            (ExtremeHeat, Ja),
            &["涼しい部屋 過ごし方", "夏 室内", "アイス レシピ", "エアコン 快適", "避暑地"][..],
        ),
        (
            (ExtremeHeat, En),
            &["indoor summer activities", "cool room ideas", "ice cream recipes", "beat the heat", "air conditioning tips"][..],
        ),
        (
            (ExtremeCold, Ja),
            &["冬 室内 過ごし方", "温かい飲み物 レシピ", "こたつ", "暖房 快適", "冬の読書"][..],
        ),
        (
            (ExtremeCold, En),
            &["cozy winter activities", "hot beverage recipes", "warm indoor ideas", "winter reading", "fireplace ambience"][..],
        ),
        (
            (Rain, Ja),
            &["雨の日 過ごし方", "ジャズ BGM", "読書 おすすめ", "室内 趣味", "料理 レシピ"][..],
        ),
        (
            (Rain, En),
            &["rainy day activities", "jazz music", "book recommendations", "indoor hobbies", "cooking recipes"][..],
        ),
        (
            (Snow, Ja),
            &["雪の日 過ごし方", "雪遊び", "鍋 レシピ", "冬 映画 おすすめ", "雪景色 癒し"][..],
        ),
        (
            (Snow, En),
            &["snow day activities", "building a snowman", "soup recipes", "winter movies", "snowfall ambience"][..],
        ),
        (
            (Storm, Ja),
            &["台風 備え", "防災", "安全な過ごし方", "リラックス 音楽", "瞑想"][..],
        ),
        (
            (Storm, En),
            &["storm preparation", "safety tips", "relaxation music", "meditation", "calming videos"][..],
        ),
    ])
});

/// Keywords for a category in `language`, falling back to
/// [`Language::DEFAULT`].
pub fn keywords(category: WeatherCategory, language: Language) -> Result<&'static [&'static str]> {
    KEYWORDS
        .get(&(category, language))
        .or_else(|| KEYWORDS.get(&(category, Language::DEFAULT)))
        .copied()
        .ok_or_else(|| {
            SuggestionError::configuration(format!(
                "no search keywords for category '{}' in '{}' or '{}'",
                category,
                language,
                Language::DEFAULT
            ))
        })
}

/// Search query for a category: its keywords joined with
/// [`KEYWORD_SEPARATOR`].
pub fn build_query(category: WeatherCategory, language: Language) -> Result<String> {
    Ok(keywords(category, language)?.join(KEYWORD_SEPARATOR))
}
