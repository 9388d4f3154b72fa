//! Video search via the YouTube Data API v3.
//!
//! ## Example
//!
//! ```ignore
//! use chillax::video::{VideoSearch, YouTubeClient};
//! use chillax::Language;
//!
//! let client = YouTubeClient::from_env()?;
//! let videos = client.search("picnic ideas | park walking", Language::En, 5).await?;
//! ```

pub mod types;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, Stage, SuggestionError};
use crate::language::Language;
use types::{ErrorEnvelope, SearchItem, SearchResponse};

/// Default number of videos per suggestion.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Upper bound the search endpoint accepts for `maxResults`.
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Descriptions longer than this many characters are cut.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// A video suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    /// YouTube video id.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Channel title.
    pub channel: String,
    /// Description, truncated.
    pub description: String,
    /// Watch URL.
    pub url: String,
    /// Thumbnail URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl VideoResult {
    /// Build a result from a search item. Items that are not videos yield
    /// `None`.
    pub fn from_item(item: SearchItem) -> Option<Self> {
        let video_id = item.id.video_id?;
        let snippet = item.snippet;
        Some(Self {
            url: format!("{WATCH_URL}{video_id}"),
            thumbnail: snippet.thumbnails.preferred().map(|t| t.url.clone()),
            description: truncate_description(&snippet.description),
            title: snippet.title,
            channel: snippet.channel_title,
            video_id,
        })
    }
}

/// Cut to [`DESCRIPTION_MAX_CHARS`] characters and append `...` when
/// anything was dropped.
pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_MAX_CHARS) {
        Some((byte_index, _)) => format!("{}...", &description[..byte_index]),
        None => description.to_string(),
    }
}

/// Source of video search results.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Up to `limit` videos for `query`, biased towards `language`, in
    /// search-ranked order.
    async fn search(&self, query: &str, language: Language, limit: u32)
        -> Result<Vec<VideoResult>>;
}

/// YouTube search client.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/youtube/v3";

    /// Create a new client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `YOUTUBE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| SuggestionError::configuration("YOUTUBE_API_KEY not set"))?;
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
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(
        &self,
        query: &str,
        language: Language,
        limit: u32,
    ) -> Result<Vec<VideoResult>> {
        let url = format!("{}/search", self.base_url);
        let max_results = limit.clamp(1, MAX_RESULTS_LIMIT).to_string();
        debug!(query, lang = language.code(), max_results = %max_results, "Searching videos");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("key", self.api_key.as_str()),
                ("maxResults", max_results.as_str()),
                ("regionCode", language.region_code()),
                ("relevanceLanguage", language.code()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Video search request failed");
                SuggestionError::from_reqwest(Stage::Video, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Video search API returned an error");
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SuggestionError::upstream_status(
                Stage::Video,
                status.as_u16(),
                detail,
            ));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SuggestionError::from_reqwest(Stage::Video, e))?;

        let videos: Vec<VideoResult> = parsed
            .items
            .into_iter()
            .filter_map(VideoResult::from_item)
            .collect();

        info!(count = videos.len(), "Videos retrieved");
        Ok(videos)
    }
}
