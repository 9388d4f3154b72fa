//! YouTube Data API v3 `search` types.

use serde::Deserialize;

/// Search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Results in ranked order.
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One search result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// Resource id; only videos carry `videoId`.
    pub id: ResourceId,
    /// Snippet metadata.
    #[serde(default)]
    pub snippet: Snippet,
}

/// Resource id of a search result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// Resource kind, e.g. `youtube#video`.
    #[serde(default)]
    pub kind: String,
    /// Video id.
    pub video_id: Option<String>,
}

/// Snippet metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnails by size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium thumbnail, else whichever size exists.
    pub fn preferred(&self) -> Option<&Thumbnail> {
        self.medium
            .as_ref()
            .or(self.high.as_ref())
            .or(self.default.as_ref())
    }
}

/// A thumbnail image.
#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}
