//! YouTube Data API Data Transfer Objects
//!
//! Example `search.list` response (part=snippet, type=video):
//! ```json
//! {
//!   "items": [{
//!     "id": {"kind": "youtube#video", "videoId": "FGBhQbmPwH8"},
//!     "snippet": {
//!       "title": "Daft Punk - One More Time (Official Video)",
//!       "channelTitle": "Daft Punk",
//!       "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/FGBhQbmPwH8/hqdefault.jpg"}}
//!     }
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchItem {
    pub id: ItemId,
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemId {
    /// Absent for channel/playlist results
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// HTML-escaped by the API
    pub title: Option<String>,
    pub channel_title: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
}
