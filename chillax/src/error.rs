//! Error types for the suggestion pipeline.

use serde::Serialize;
use thiserror::Error;

/// Pipeline stage talking to an upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// The weather forecast API.
    Weather,
    /// The video search API.
    Video,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weather => f.write_str("weather"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// Errors that can end a suggestion request.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// Caller supplied an unusable argument.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong.
        message: String,
    },

    /// The weather API does not know the city.
    #[error("City not found: {city}")]
    CityNotFound {
        /// City as requested.
        city: String,
    },

    /// The forecast has no entry for the requested day.
    #[error("No forecast available for {city} {days_ahead} day(s) ahead")]
    ForecastUnavailable {
        /// City as requested.
        city: String,
        /// Requested day offset.
        days_ahead: i64,
    },

    /// An upstream API could not be reached or answered with a failure.
    #[error("{stage} service unavailable: {message}")]
    UpstreamUnavailable {
        /// Which upstream failed.
        stage: Stage,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Error detail.
        message: String,
    },

    /// Missing configuration or a hole in a static table.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is missing.
        message: String,
    },
}

impl SuggestionError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an upstream error without an HTTP status.
    pub fn upstream(stage: Stage, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            stage,
            status: None,
            message: message.into(),
        }
    }

    /// Create an upstream error for a non-success HTTP status.
    pub fn upstream_status(stage: Stage, status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            stage,
            status: Some(status),
            message: format!("HTTP {}: {}", status, body.into()),
        }
    }

    /// Wrap a reqwest transport or decoding error.
    pub fn from_reqwest(stage: Stage, err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable {
            stage,
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    /// The failing upstream stage, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::UpstreamUnavailable { stage, .. } => Some(*stage),
            Self::CityNotFound { .. } | Self::ForecastUnavailable { .. } => Some(Stage::Weather),
            Self::InvalidArgument { .. } | Self::Configuration { .. } => None,
        }
    }
}

/// Result type for suggestion operations.
pub type Result<T> = std::result::Result<T, SuggestionError>;
