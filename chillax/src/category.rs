//! Coarse weather categories.
//!
//! A forecast is classified by walking [`RULES`] top to bottom and taking
//! the first match. The order is the precedence: hazardous weather first,
//! then precipitation, then temperature extremes, then sky cover.

use serde::{Deserialize, Serialize};

use crate::weather::Forecast;

/// Slot `temp_max` at or above which the forecast counts as extreme heat (°C).
pub const HEAT_THRESHOLD_C: f64 = 30.0;

/// Slot `temp_min` at or below which the forecast counts as extreme cold (°C).
pub const COLD_THRESHOLD_C: f64 = 10.0;

/// Weather category driving the activity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCategory {
    /// Thunderstorms, tornadoes, squalls.
    Storm,
    /// Rain or drizzle.
    Rain,
    /// Snow.
    Snow,
    /// Very hot day.
    ExtremeHeat,
    /// Very cold day.
    ExtremeCold,
    /// Overcast or hazy.
    Cloudy,
    /// Fair weather.
    Clear,
}

impl WeatherCategory {
    /// Every category, in precedence order.
    pub const ALL: [WeatherCategory; 7] = [
        WeatherCategory::Storm,
        WeatherCategory::Rain,
        WeatherCategory::Snow,
        WeatherCategory::ExtremeHeat,
        WeatherCategory::ExtremeCold,
        WeatherCategory::Cloudy,
        WeatherCategory::Clear,
    ];

    /// Kebab-case name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Storm => "storm",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::ExtremeHeat => "extreme-heat",
            Self::ExtremeCold => "extreme-cold",
            Self::Cloudy => "cloudy",
            Self::Clear => "clear",
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type Rule = (WeatherCategory, fn(&Forecast) -> bool);

/// Ordered decision table. First match wins; no match means clear.
pub const RULES: &[Rule] = &[
    (WeatherCategory::Storm, is_stormy),
    (WeatherCategory::Rain, is_rainy),
    (WeatherCategory::Snow, is_snowy),
    (WeatherCategory::ExtremeHeat, is_extreme_heat),
    (WeatherCategory::ExtremeCold, is_extreme_cold),
    (WeatherCategory::Cloudy, is_cloudy),
];

fn is_stormy(f: &Forecast) -> bool {
    condition_has(f, &["thunderstorm", "storm", "tornado", "squall"])
}

fn is_rainy(f: &Forecast) -> bool {
    condition_has(f, &["rain", "drizzle"])
}

fn is_snowy(f: &Forecast) -> bool {
    condition_has(f, &["snow"])
}

fn is_extreme_heat(f: &Forecast) -> bool {
    f.temp_max >= HEAT_THRESHOLD_C
}

fn is_extreme_cold(f: &Forecast) -> bool {
    f.temp_min <= COLD_THRESHOLD_C
}

// Obscurations (mist, haze, ...) read as a grey day, not a clear one.
fn is_cloudy(f: &Forecast) -> bool {
    condition_has(
        f,
        &["cloud", "mist", "fog", "haze", "smoke", "dust", "sand", "ash"],
    )
}

fn condition_has(forecast: &Forecast, needles: &[&str]) -> bool {
    let condition = forecast.condition.to_lowercase();
    needles.iter().any(|n| condition.contains(n))
}

/// Classify a forecast.
pub fn categorize(forecast: &Forecast) -> WeatherCategory {
    RULES
        .iter()
        .find(|(_, matches)| matches(forecast))
        .map(|(category, _)| *category)
        .unwrap_or(WeatherCategory::Clear)
}
