//! Weather forecasts from OpenWeatherMap.
//!
//! Uses the 5 day / 3 hour forecast endpoint and reduces it to one
//! [`Forecast`] for the requested day: the slot closest to local noon.
//!
//! ## Example
//!
//! ```ignore
//! use chillax::weather::{ForecastProvider, OpenWeatherClient};
//! use chillax::Language;
//!
//! let client = OpenWeatherClient::from_env()?;
//! let forecast = client.forecast("Tokyo", 1, Language::Ja).await?;
//! ```

pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, Stage, SuggestionError};
use crate::language::Language;
use types::{ErrorResponse, ForecastEntry, ForecastResponse};

/// Furthest day offset the forecast endpoint covers.
pub const MAX_DAYS_AHEAD: i64 = 5;

/// Normalized forecast for one city and day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// City as requested.
    pub city: String,
    /// Country code reported by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Requested day offset (0 = today).
    pub days_ahead: i64,
    /// Local date of the forecast.
    pub date: NaiveDate,
    /// Local time of the forecast slot.
    pub time: NaiveDateTime,
    /// Condition group, e.g. `Clear`, `Rain`.
    pub condition: String,
    /// Human-readable description in the request language.
    pub description: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Minimum temperature of the selected slot in °C.
    pub temp_min: f64,
    /// Maximum temperature of the selected slot in °C.
    pub temp_max: f64,
    /// Relative humidity in %.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    /// Wind speed in m/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

impl Forecast {
    /// Create a forecast for today with a flat temperature.
    pub fn new(
        city: impl Into<String>,
        days_ahead: i64,
        condition: impl Into<String>,
        temperature: f64,
    ) -> Self {
        let time = Utc::now().naive_utc();
        let condition = condition.into();
        Self {
            city: city.into(),
            country: None,
            days_ahead,
            date: time.date(),
            time,
            description: condition.to_lowercase(),
            condition,
            temperature,
            temp_min: temperature,
            temp_max: temperature,
            humidity: None,
            wind_speed: None,
        }
    }

    /// Set the slot's temperature range.
    pub fn with_temp_range(mut self, min: f64, max: f64) -> Self {
        self.temp_min = min;
        self.temp_max = max;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// One-line summary, e.g. `Tokyo - 2025-06-01: clear sky (24.0°C)`.
    pub fn summary(&self) -> String {
        format!(
            "{} - {}: {} ({:.1}°C)",
            self.city, self.date, self.description, self.temperature
        )
    }
}

/// Source of forecasts.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Forecast for `city`, `days_ahead` days from today, with the
    /// description in `language`.
    async fn forecast(&self, city: &str, days_ahead: i64, language: Language) -> Result<Forecast>;
}

/// Check a forecast request before it leaves the process.
pub fn validate_request(city: &str, days_ahead: i64) -> Result<()> {
    if city.trim().is_empty() {
        return Err(SuggestionError::invalid_argument("city must not be empty"));
    }
    if !(0..=MAX_DAYS_AHEAD).contains(&days_ahead) {
        return Err(SuggestionError::invalid_argument(format!(
            "days_ahead must be between 0 and {}, got {}",
            MAX_DAYS_AHEAD, days_ahead
        )));
    }
    Ok(())
}

/// OpenWeatherMap forecast client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openweathermap.org/data/2.5";

    /// Create a new client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENWEATHER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .map_err(|_| SuggestionError::configuration("OPENWEATHER_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Set custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn fetch(&self, city: &str, language: Language) -> Result<ForecastResponse> {
        let url = format!("{}/forecast", self.base_url);
        debug!(city, lang = language.code(), "Requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", language.code()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(city, error = %e, "Forecast request failed");
                SuggestionError::from_reqwest(Stage::Weather, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();

            if status == StatusCode::NOT_FOUND || parsed.as_ref().is_some_and(|e| e.is_not_found())
            {
                return Err(SuggestionError::CityNotFound {
                    city: city.to_string(),
                });
            }

            warn!(city, status = status.as_u16(), "Forecast API returned an error");
            let detail = parsed.map(|e| e.message).unwrap_or(body);
            return Err(SuggestionError::upstream_status(
                Stage::Weather,
                status.as_u16(),
                detail,
            ));
        }

        response
            .json()
            .await
            .map_err(|e| SuggestionError::from_reqwest(Stage::Weather, e))
    }
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    async fn forecast(&self, city: &str, days_ahead: i64, language: Language) -> Result<Forecast> {
        validate_request(city, days_ahead)?;

        let response = self.fetch(city.trim(), language).await?;
        let offset = response
            .city
            .as_ref()
            .and_then(|c| FixedOffset::east_opt(c.timezone))
            .unwrap_or_else(|| Utc.fix());

        let target = Utc::now()
            .with_timezone(&offset)
            .date_naive()
            .checked_add_days(Days::new(days_ahead.unsigned_abs()))
            .ok_or_else(|| SuggestionError::invalid_argument("days_ahead out of range"))?;

        let (entry, time) = select_entry(&response.list, offset, target).ok_or_else(|| {
            SuggestionError::ForecastUnavailable {
                city: city.to_string(),
                days_ahead,
            }
        })?;

        let condition = entry.primary_condition();
        let forecast = Forecast {
            city: city.trim().to_string(),
            country: response.city.as_ref().and_then(|c| c.country.clone()),
            days_ahead,
            date: target,
            time,
            condition: condition.map(|c| c.main.clone()).unwrap_or_default(),
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            temperature: entry.main.temp,
            temp_min: entry.main.temp_min.unwrap_or(entry.main.temp),
            temp_max: entry.main.temp_max.unwrap_or(entry.main.temp),
            humidity: entry.main.humidity,
            wind_speed: entry.wind.as_ref().map(|w| w.speed),
        };

        info!(
            city = %forecast.city,
            date = %forecast.date,
            condition = %forecast.condition,
            temperature = forecast.temperature,
            "Forecast retrieved"
        );
        Ok(forecast)
    }
}

/// Pick the entry for `target` (a local date): the first slot with a local
/// hour in 11..=13, else the first slot of that date.
pub(crate) fn select_entry(
    entries: &[ForecastEntry],
    offset: FixedOffset,
    target: NaiveDate,
) -> Option<(&ForecastEntry, NaiveDateTime)> {
    let mut first_of_day = None;

    for entry in entries {
        let Some(utc) = DateTime::<Utc>::from_timestamp(entry.dt, 0) else {
            continue;
        };
        let local = utc.with_timezone(&offset).naive_local();
        if local.date() != target {
            continue;
        }
        if (11..=13).contains(&local.hour()) {
            return Some((entry, local));
        }
        if first_of_day.is_none() {
            first_of_day = Some((entry, local));
        }
    }

    first_of_day
}
