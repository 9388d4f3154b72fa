//! OpenWeatherMap 5 day / 3 hour forecast API types.

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// 3-hourly forecast entries, oldest first.
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    /// The city the API matched.
    pub city: Option<CityInfo>,
}

/// One 3-hourly forecast entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (UTC) of the forecast slot.
    pub dt: i64,
    /// Temperature and humidity.
    pub main: MainReadings,
    /// Condition groups; the first is the primary one.
    #[serde(default)]
    pub weather: Vec<Condition>,
    /// Wind readings.
    pub wind: Option<Wind>,
}

impl ForecastEntry {
    /// Primary condition, if the API sent any.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// Temperature (metric units) and humidity.
#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    /// Temperature in °C.
    pub temp: f64,
    /// Minimum temperature in °C.
    pub temp_min: Option<f64>,
    /// Maximum temperature in °C.
    pub temp_max: Option<f64>,
    /// Relative humidity in %.
    pub humidity: Option<u8>,
}

/// Weather condition.
#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    /// Condition group, e.g. `Rain`, `Clear`, `Thunderstorm`.
    pub main: String,
    /// Localized description, e.g. `light rain`.
    #[serde(default)]
    pub description: String,
}

/// Wind readings.
#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s.
    pub speed: f64,
}

/// City block of the forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    /// City name as matched by the API.
    pub name: String,
    /// Country code.
    pub country: Option<String>,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}

/// Error body. `cod` is a string on some endpoints and a number on others.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Status code echoed in the body.
    #[serde(default)]
    pub cod: JsonValue,
    /// Error message.
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    /// Whether the body reports an unknown city.
    pub fn is_not_found(&self) -> bool {
        match &self.cod {
            JsonValue::String(s) => s == "404",
            JsonValue::Number(n) => n.as_u64() == Some(404),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forecast_response() {
        let body = serde_json::json!({
            "cod": "200",
            "message": 0,
            "cnt": 1,
            "list": [{
                "dt": 1_661_871_600,
                "main": {"temp": 24.1, "feels_like": 24.0, "temp_min": 22.0, "temp_max": 25.5, "pressure": 1015, "humidity": 64},
                "weather": [{"id": 500, "main": "Rain", "description": "小雨", "icon": "10d"}],
                "clouds": {"all": 100},
                "wind": {"speed": 3.2, "deg": 180},
                "dt_txt": "2022-08-30 15:00:00"
            }],
            "city": {"id": 1850147, "name": "Tokyo", "country": "JP", "timezone": 32400}
        });

        let parsed: ForecastResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.list.len(), 1);
        let entry = &parsed.list[0];
        assert_eq!(entry.primary_condition().unwrap().main, "Rain");
        assert_eq!(entry.main.humidity, Some(64));
        assert_eq!(parsed.city.unwrap().timezone, 32400);
    }

    #[test]
    fn test_error_response_cod_variants() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"cod":"404","message":"city not found"}"#).unwrap();
        assert!(err.is_not_found());

        let err: ErrorResponse =
            serde_json::from_str(r#"{"cod":401,"message":"Invalid API key"}"#).unwrap();
        assert!(!err.is_not_found());
        assert_eq!(err.message, "Invalid API key");
    }
}
