//! # chillax
//!
//! Weather-aware activity suggestions. Given a city and a day offset,
//! chillax fetches the forecast from OpenWeatherMap, sorts the day into a
//! coarse [`WeatherCategory`], turns that into a YouTube search in the
//! city's language, and returns the forecast together with the videos.
//!
//! The pipeline is exposed as the MCP tool `get_activity_suggestion`
//! (see [`tool`]); the `chillax` binary serves it over stdio.
//!
//! ## Example
//!
//! ```ignore
//! use chillax::Config;
//!
//! let suggester = Config::from_env()?.suggester()?;
//! let response = suggester.get_activity_suggestion("Tokyo", 1).await?;
//! println!("{}: {}", response.category, response.query);
//! ```

#![deny(unsafe_code)]

pub mod category;
pub mod config;
pub mod error;
pub mod language;
pub mod query;
pub mod suggestion;
pub mod tool;
pub mod video;
pub mod weather;

pub use category::{categorize, WeatherCategory};
pub use config::Config;
pub use error::{Result, Stage, SuggestionError};
pub use language::{resolve_language, Language};
pub use query::build_query;
pub use suggestion::{ActivitySuggester, SuggestionResponse, WeatherReport};
pub use tool::ActivitySuggestionTool;
pub use video::{VideoResult, VideoSearch, YouTubeClient};
pub use weather::{Forecast, ForecastProvider, OpenWeatherClient};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
