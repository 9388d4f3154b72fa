//! The suggestion pipeline.
//!
//! `get_activity_suggestion` runs strictly in sequence: resolve language,
//! fetch the forecast, categorize it, build the search query, fetch
//! videos. The first failing stage ends the request; nothing is retried
//! and no partial response is produced.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::category::{categorize, WeatherCategory};
use crate::error::Result;
use crate::language::{resolve_language, Language};
use crate::query::build_query;
use crate::video::{VideoResult, VideoSearch, DEFAULT_MAX_RESULTS};
use crate::weather::{validate_request, Forecast, ForecastProvider};

/// Result of one suggestion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Forecast the suggestion is based on.
    pub forecast: Forecast,
    /// Category derived from the forecast.
    pub category: WeatherCategory,
    /// Language resolved from the city.
    pub language: Language,
    /// Search query sent to the video API.
    pub query: String,
    /// Why these videos, in the resolved language.
    pub reason: String,
    /// One-line weather summary.
    pub summary: String,
    /// Videos in search-ranked order. May be empty.
    pub videos: Vec<VideoResult>,
}

/// Forecast and category without the video search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// The forecast.
    pub forecast: Forecast,
    /// Category derived from the forecast.
    pub category: WeatherCategory,
    /// Language resolved from the city.
    pub language: Language,
    /// One-line weather summary.
    pub summary: String,
}

/// Localized explanation for a category, falling back to
/// [`Language::DEFAULT`].
pub fn suggestion_reason(category: WeatherCategory, language: Language) -> &'static str {
    localized_reason(category, language)
        .or_else(|| localized_reason(category, Language::DEFAULT))
        .unwrap_or_default()
}

fn localized_reason(category: WeatherCategory, language: Language) -> Option<&'static str> {
    use Language::{En, Ja};
    use WeatherCategory::*;

    let reason = match (category, language) {
        (Clear, Ja) => "素晴らしい天気です！外出を楽しむのに最適な日です。",
        (Clear, En) => "Perfect weather! It's a great day to enjoy outdoor activities.",
        (Cloudy, Ja) => "曇り空の一日です。街歩きやカフェ巡りを楽しみましょう。",
        (Cloudy, En) => "A grey but dry day. Good for a city walk or a cafe.",
        (ExtremeHeat, Ja) => "とても暑い日になりそうです。涼しい室内で快適に過ごしましょう。",
        (ExtremeHeat, En) => "It's going to be very hot. Stay cool and comfortable indoors.",
        (ExtremeCold, Ja) => "寒い日になりそうです。温かい室内で心地よく過ごしましょう。",
        (ExtremeCold, En) => "It's going to be cold. Stay warm and cozy indoors.",
        (Rain, Ja) => "雨の日は室内でゆったりと。読書や音楽を楽しむのに最適です。",
        (Rain, En) => {
            "A rainy day is perfect for indoor activities. Enjoy some music or a good book."
        }
        (Snow, Ja) => "雪の日です。暖かくして雪景色や室内の時間を楽しみましょう。",
        (Snow, En) => "Snow is on the way. Bundle up or enjoy a cozy day inside.",
        (Storm, Ja) => "荒天が予想されます。安全を第一に、リラックスして過ごしましょう。",
        (Storm, En) => "Stormy weather expected. Stay safe and relaxed indoors.",
        _ => return None,
    };
    Some(reason)
}

/// Runs the suggestion pipeline against a forecast provider and a video
/// search backend.
#[derive(Debug, Clone)]
pub struct ActivitySuggester<F, V> {
    forecasts: F,
    videos: V,
    max_videos: u32,
}

impl<F, V> ActivitySuggester<F, V>
where
    F: ForecastProvider,
    V: VideoSearch,
{
    /// Create a suggester returning up to [`DEFAULT_MAX_RESULTS`] videos.
    pub fn new(forecasts: F, videos: V) -> Self {
        Self {
            forecasts,
            videos,
            max_videos: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the number of videos requested per suggestion.
    pub fn with_max_videos(mut self, max_videos: u32) -> Self {
        self.max_videos = max_videos;
        self
    }

    /// Number of videos requested per suggestion.
    pub fn max_videos(&self) -> u32 {
        self.max_videos
    }

    /// Forecast and category for a city and day, without the video search.
    pub async fn weather_report(&self, city: &str, days_ahead: i64) -> Result<WeatherReport> {
        validate_request(city, days_ahead)?;

        let language = resolve_language(city);
        let forecast = self.forecasts.forecast(city, days_ahead, language).await?;
        let category = categorize(&forecast);
        debug!(city, lang = language.code(), category = category.as_str(), "Forecast categorized");

        Ok(WeatherReport {
            summary: forecast.summary(),
            forecast,
            category,
            language,
        })
    }

    /// Weather-appropriate videos for `city`, `days_ahead` days from today.
    pub async fn get_activity_suggestion(
        &self,
        city: &str,
        days_ahead: i64,
    ) -> Result<SuggestionResponse> {
        let WeatherReport {
            forecast,
            category,
            language,
            summary,
        } = self.weather_report(city, days_ahead).await?;

        let query = build_query(category, language)?;
        let videos = self.videos.search(&query, language, self.max_videos).await?;

        info!(
            city,
            days_ahead,
            category = category.as_str(),
            videos = videos.len(),
            "Suggestion assembled"
        );

        Ok(SuggestionResponse {
            summary,
            reason: suggestion_reason(category, language).to_string(),
            forecast,
            category,
            language,
            query,
            videos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Stage, SuggestionError};
    use crate::query::keywords;
    use crate::weather::OpenWeatherClient;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct MockForecasts {
        forecast: Option<Forecast>,
        calls: AtomicUsize,
        languages: Mutex<Vec<Language>>,
    }

    impl MockForecasts {
        fn returning(forecast: Forecast) -> Self {
            Self {
                forecast: Some(forecast),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ForecastProvider for Arc<MockForecasts> {
        async fn forecast(
            &self,
            city: &str,
            _days_ahead: i64,
            language: Language,
        ) -> Result<Forecast> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.languages.lock().unwrap().push(language);
            self.forecast.clone().ok_or_else(|| SuggestionError::CityNotFound {
                city: city.to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MockVideos {
        videos: Vec<VideoResult>,
        fail: bool,
        calls: AtomicUsize,
        queries: Mutex<Vec<(String, Language, u32)>>,
    }

    #[async_trait]
    impl VideoSearch for Arc<MockVideos> {
        async fn search(
            &self,
            query: &str,
            language: Language,
            limit: u32,
        ) -> Result<Vec<VideoResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries
                .lock()
                .unwrap()
                .push((query.to_string(), language, limit));
            if self.fail {
                return Err(SuggestionError::upstream_status(Stage::Video, 403, "quota"));
            }
            Ok(self.videos.clone())
        }
    }

    fn video(id: &str) -> VideoResult {
        VideoResult {
            video_id: id.to_string(),
            title: format!("Video {id}"),
            channel: "Channel".to_string(),
            description: String::new(),
            url: format!("https://www.youtube.com/watch?v={id}"),
            thumbnail: None,
        }
    }

    #[tokio::test]
    async fn test_tokyo_clear_day_uses_japanese_keywords() {
        let forecasts = Arc::new(MockForecasts::returning(
            Forecast::new("Tokyo", 1, "Clear", 24.0).with_description("晴天"),
        ));
        let videos = Arc::new(MockVideos {
            videos: vec![video("a"), video("b")],
            ..Default::default()
        });
        let suggester =
            ActivitySuggester::new(forecasts.clone(), videos.clone()).with_max_videos(3);

        let response = suggester.get_activity_suggestion("Tokyo", 1).await.unwrap();

        assert_eq!(response.category, WeatherCategory::Clear);
        assert_eq!(response.language, Language::Ja);
        let expected_query = keywords(WeatherCategory::Clear, Language::Ja)
            .unwrap()
            .join(" | ");
        assert_eq!(response.query, expected_query);
        assert_eq!(response.videos.len(), 2);
        assert_eq!(response.reason, suggestion_reason(WeatherCategory::Clear, Language::Ja));
        assert!(response.summary.contains("晴天"));

        assert_eq!(*forecasts.languages.lock().unwrap(), vec![Language::Ja]);
        let queries = videos.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0], (expected_query, Language::Ja, 3));
    }

    #[tokio::test]
    async fn test_storm_beats_heat() {
        let forecasts = Arc::new(MockForecasts::returning(
            Forecast::new("Miami", 0, "Thunderstorm", 34.0),
        ));
        let videos = Arc::new(MockVideos::default());
        let suggester = ActivitySuggester::new(forecasts, videos);

        let response = suggester.get_activity_suggestion("Miami", 0).await.unwrap();
        assert_eq!(response.category, WeatherCategory::Storm);
        assert_eq!(response.language, Language::En);
    }

    #[tokio::test]
    async fn test_weather_failure_skips_video_search() {
        let forecasts = Arc::new(MockForecasts::failing());
        let videos = Arc::new(MockVideos::default());
        let suggester = ActivitySuggester::new(forecasts.clone(), videos.clone());

        let err = suggester
            .get_activity_suggestion("Atlantis", 0)
            .await
            .unwrap_err();

        assert!(matches!(err, SuggestionError::CityNotFound { .. }));
        assert_eq!(forecasts.calls.load(Ordering::SeqCst), 1);
        assert_eq!(videos.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_days_touch_no_upstream() {
        let weather_server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&weather_server)
            .await;

        let weather = OpenWeatherClient::new("k").with_base_url(weather_server.uri());
        let videos = Arc::new(MockVideos::default());
        let suggester = ActivitySuggester::new(weather, videos.clone());

        let err = suggester
            .get_activity_suggestion("Tokyo", 10)
            .await
            .unwrap_err();

        assert!(matches!(err, SuggestionError::InvalidArgument { .. }));
        assert_eq!(videos.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_video_list_is_valid() {
        let forecasts = Arc::new(MockForecasts::returning(Forecast::new(
            "London", 2, "Rain", 14.0,
        )));
        let videos = Arc::new(MockVideos::default());
        let suggester = ActivitySuggester::new(forecasts, videos);

        let response = suggester.get_activity_suggestion("London", 2).await.unwrap();
        assert_eq!(response.category, WeatherCategory::Rain);
        assert!(response.videos.is_empty());
    }

    #[tokio::test]
    async fn test_video_failure_propagates() {
        let forecasts = Arc::new(MockForecasts::returning(Forecast::new(
            "Seoul", 0, "Clouds", 20.0,
        )));
        let videos = Arc::new(MockVideos {
            fail: true,
            ..Default::default()
        });
        let suggester = ActivitySuggester::new(forecasts, videos.clone());

        let err = suggester.get_activity_suggestion("Seoul", 0).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Video));

        // Korean has no keyword table of its own; the query falls back but
        // the region bias stays Korean.
        let queries = videos.queries.lock().unwrap();
        assert_eq!(queries[0].1, Language::Ko);
        assert_eq!(
            queries[0].0,
            keywords(WeatherCategory::Cloudy, Language::En).unwrap().join(" | ")
        );
    }

    #[tokio::test]
    async fn test_weather_report_skips_video_search() {
        let forecasts = Arc::new(MockForecasts::returning(
            Forecast::new("Osaka", 3, "Snow", -1.0).with_description("雪"),
        ));
        let videos = Arc::new(MockVideos::default());
        let suggester = ActivitySuggester::new(forecasts, videos.clone());

        let report = suggester.weather_report("Osaka", 3).await.unwrap();
        assert_eq!(report.category, WeatherCategory::Snow);
        assert_eq!(report.language, Language::Ja);
        assert!(report.summary.starts_with("Osaka - "));
        assert_eq!(videos.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_every_category_has_a_reason() {
        for category in WeatherCategory::ALL {
            for language in Language::ALL {
                assert!(!suggestion_reason(category, language).is_empty());
            }
        }
        assert_eq!(
            suggestion_reason(WeatherCategory::Rain, Language::Zh),
            suggestion_reason(WeatherCategory::Rain, Language::En)
        );
    }

    #[test]
    fn test_response_serializes_category_kebab_case() {
        let response = SuggestionResponse {
            forecast: Forecast::new("Tokyo", 0, "Clear", 31.0),
            category: WeatherCategory::ExtremeHeat,
            language: Language::Ja,
            query: "q".into(),
            reason: "r".into(),
            summary: "s".into(),
            videos: vec![],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["category"], "extreme-heat");
        assert_eq!(value["language"], "ja");
        assert_eq!(value["videos"], serde_json::json!([]));
    }
}
