//! Spotify Web API Data Transfer Objects
//!
//! These types match what the search endpoint returns, trimmed to the
//! fields we read. Convert to domain types in `adapter.rs`.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api/reference/search
//!
//! Example response:
//! ```json
//! {
//!   "tracks": {
//!     "items": [{
//!       "id": "0DiWol3AO6WpXZgp0goxAV",
//!       "name": "One More Time",
//!       "artists": [{"name": "Daft Punk"}],
//!       "album": {"images": [{"url": "https://i.scdn.co/image/ab67", "width": 640}]},
//!       "external_urls": {"spotify": "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"}
//!     }]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level search response for `type=track`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    /// Widest first, per the API; the first entry is used as artwork
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}
