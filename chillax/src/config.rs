//! Process configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `OPENWEATHER_API_KEY` | required |
//! | `YOUTUBE_API_KEY` | required |
//! | `OPENWEATHER_BASE_URL` | `https://api.openweathermap.org/data/2.5` |
//! | `YOUTUBE_BASE_URL` | `https://www.googleapis.com/youtube/v3` |
//! | `CHILLAX_MAX_VIDEOS` | `5` |
//! | `CHILLAX_HTTP_TIMEOUT_SECS` | `30` |

use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, SuggestionError};
use crate::suggestion::ActivitySuggester;
use crate::video::{YouTubeClient, DEFAULT_MAX_RESULTS};
use crate::weather::OpenWeatherClient;

/// Default HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub weather_api_key: String,
    /// YouTube Data API key.
    pub video_api_key: String,
    /// OpenWeatherMap base URL.
    pub weather_base_url: String,
    /// YouTube Data API base URL.
    pub video_base_url: String,
    /// Videos per suggestion.
    pub max_videos: u32,
    /// Timeout for each upstream request.
    pub http_timeout: Duration,
}

impl Config {
    /// Load from the process environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &str| {
            get(name).ok_or_else(|| SuggestionError::configuration(format!("{name} not set")))
        };

        Ok(Self {
            weather_api_key: require("OPENWEATHER_API_KEY")?,
            video_api_key: require("YOUTUBE_API_KEY")?,
            weather_base_url: get("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| OpenWeatherClient::DEFAULT_BASE_URL.to_string()),
            video_base_url: get("YOUTUBE_BASE_URL")
                .unwrap_or_else(|| YouTubeClient::DEFAULT_BASE_URL.to_string()),
            max_videos: positive_or("CHILLAX_MAX_VIDEOS", get("CHILLAX_MAX_VIDEOS"), DEFAULT_MAX_RESULTS)?,
            http_timeout: Duration::from_secs(positive_or(
                "CHILLAX_HTTP_TIMEOUT_SECS",
                get("CHILLAX_HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }

    fn http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.http_timeout)
            .build()
            .map_err(|e| SuggestionError::configuration(format!("HTTP client: {e}")))
    }

    /// Forecast client for this configuration.
    pub fn weather_client(&self) -> Result<OpenWeatherClient> {
        Ok(OpenWeatherClient::new(&self.weather_api_key)
            .with_base_url(&self.weather_base_url)
            .with_client(self.http_client()?))
    }

    /// Video search client for this configuration.
    pub fn video_client(&self) -> Result<YouTubeClient> {
        Ok(YouTubeClient::new(&self.video_api_key)
            .with_base_url(&self.video_base_url)
            .with_client(self.http_client()?))
    }

    /// Suggester wired to the real upstream clients.
    pub fn suggester(&self) -> Result<ActivitySuggester<OpenWeatherClient, YouTubeClient>> {
        Ok(
            ActivitySuggester::new(self.weather_client()?, self.video_client()?)
                .with_max_videos(self.max_videos),
        )
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("weather_base_url", &self.weather_base_url)
            .field("video_base_url", &self.video_base_url)
            .field("max_videos", &self.max_videos)
            .field("http_timeout", &self.http_timeout)
            .finish_non_exhaustive()
    }
}

/// Parses an optional positive integer; zero is an error.
fn positive_or<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(SuggestionError::configuration(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
