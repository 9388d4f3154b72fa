//! The `get_activity_suggestion` MCP tool, backed by the suggestion pipeline.
//!
//! Pipeline failures are reported as tool results with `isError` set, so
//! the calling model sees the message. Only protocol problems surface as
//! JSON-RPC errors.

use std::sync::Arc;

use async_trait::async_trait;
use chillax_mcp::{CallToolResult, McpResult, McpTool, ToolHandler};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::suggestion::ActivitySuggester;
use crate::video::VideoSearch;
use crate::weather::{ForecastProvider, MAX_DAYS_AHEAD};

/// Name of the suggestion tool.
pub const ACTIVITY_SUGGESTION_TOOL: &str = "get_activity_suggestion";

/// Tool arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionArgs {
    /// City name.
    pub city: String,
    /// Day offset, 0 = today.
    #[serde(default)]
    pub days_ahead: i64,
}

impl SuggestionArgs {
    fn parse(arguments: JsonValue) -> std::result::Result<Self, CallToolResult> {
        serde_json::from_value(arguments)
            .map_err(|e| CallToolResult::error(format!("Invalid arguments: {e}")))
    }
}

fn input_schema() -> JsonValue {
    serde_json::json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": "City name, e.g. \"Tokyo\" or \"New York\""
            },
            "days_ahead": {
                "type": "integer",
                "description": "Days from today",
                "minimum": 0,
                "maximum": MAX_DAYS_AHEAD,
                "default": 0
            }
        },
        "required": ["city"]
    })
}

fn to_json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("Failed to encode result: {e}")),
    }
}

/// `get_activity_suggestion`: forecast plus matching videos.
pub struct ActivitySuggestionTool<F, V> {
    suggester: Arc<ActivitySuggester<F, V>>,
}

impl<F, V> ActivitySuggestionTool<F, V> {
    /// Wrap a shared suggester.
    pub fn new(suggester: Arc<ActivitySuggester<F, V>>) -> Self {
        Self { suggester }
    }
}

#[async_trait]
impl<F, V> ToolHandler for ActivitySuggestionTool<F, V>
where
    F: ForecastProvider + 'static,
    V: VideoSearch + 'static,
{
    fn definition(&self) -> McpTool {
        McpTool::new(ACTIVITY_SUGGESTION_TOOL, input_schema()).with_description(
            "Suggest YouTube videos for spending the day, based on the weather \
             forecast for a city. Works up to 5 days ahead.",
        )
    }

    async fn call(&self, arguments: JsonValue) -> McpResult<CallToolResult> {
        let args = match SuggestionArgs::parse(arguments) {
            Ok(args) => args,
            Err(result) => return Ok(result),
        };

        match self
            .suggester
            .get_activity_suggestion(&args.city, args.days_ahead)
            .await
        {
            Ok(response) => Ok(to_json_result(&response)),
            Err(e) => {
                warn!(city = %args.city, days_ahead = args.days_ahead, error = %e, "Suggestion failed");
                Ok(CallToolResult::error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SuggestionError};
    use crate::language::Language;
    use crate::suggestion::SuggestionResponse;
    use crate::video::VideoResult;
    use crate::weather::Forecast;
    use rstest::rstest;

    struct FixedForecast(Option<Forecast>);

    #[async_trait]
    impl ForecastProvider for FixedForecast {
        async fn forecast(&self, city: &str, _days: i64, _lang: Language) -> Result<Forecast> {
            self.0.clone().ok_or_else(|| SuggestionError::CityNotFound {
                city: city.to_string(),
            })
        }
    }

    struct NoVideos;

    #[async_trait]
    impl VideoSearch for NoVideos {
        async fn search(&self, _q: &str, _l: Language, _n: u32) -> Result<Vec<VideoResult>> {
            Ok(Vec::new())
        }
    }

    fn suggester(forecast: Option<Forecast>) -> Arc<ActivitySuggester<FixedForecast, NoVideos>> {
        Arc::new(ActivitySuggester::new(FixedForecast(forecast), NoVideos))
    }

    #[test]
    fn test_definition_schema() {
        let tool = ActivitySuggestionTool::new(suggester(None));
        let def = tool.definition();
        assert_eq!(def.name, "get_activity_suggestion");
        assert_eq!(def.input_schema["required"], serde_json::json!(["city"]));
        assert_eq!(def.input_schema["properties"]["days_ahead"]["maximum"], 5);
        assert!(def.description.is_some());
    }

    #[test]
    fn test_days_ahead_defaults_to_today() {
        let args: SuggestionArgs =
            serde_json::from_value(serde_json::json!({"city": "Tokyo"})).unwrap();
        assert_eq!(args.days_ahead, 0);
    }

    #[tokio::test]
    async fn test_call_returns_json_response() {
        let tool = ActivitySuggestionTool::new(suggester(Some(Forecast::new(
            "Tokyo", 1, "Clear", 24.0,
        ))));

        let result = tool
            .call(serde_json::json!({"city": "Tokyo", "days_ahead": 1}))
            .await
            .unwrap();

        assert!(!result.is_error);
        let response: SuggestionResponse = serde_json::from_str(&result.text_content()).unwrap();
        assert_eq!(response.language, Language::Ja);
        assert!(response.videos.is_empty());
    }

    #[rstest]
    #[case::missing_city(serde_json::json!({"days_ahead": 1}), "Invalid arguments")]
    #[case::fractional_days(serde_json::json!({"city": "Tokyo", "days_ahead": 1.5}), "Invalid arguments")]
    #[case::out_of_range(serde_json::json!({"city": "Tokyo", "days_ahead": 10}), "days_ahead")]
    #[case::unknown_city(serde_json::json!({"city": "Atlantis"}), "City not found")]
    #[tokio::test]
    async fn test_failures_become_error_results(
        #[case] arguments: JsonValue,
        #[case] mentions: &str,
    ) {
        let tool = ActivitySuggestionTool::new(suggester(None));
        let result = tool.call(arguments).await.unwrap();
        assert!(result.is_error);
        assert!(result.text_content().contains(mentions), "{}", result.text_content());
    }
}
