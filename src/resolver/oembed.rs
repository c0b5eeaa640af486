//! oEmbed response shape shared by Spotify and YouTube.
//!
//! Format: https://oembed.com/#section2.3
//!
//! Example response (YouTube):
//! ```json
//! {
//!   "title": "Daft Punk - Around The World (Official Music Video)",
//!   "author_name": "Daft Punk",
//!   "thumbnail_url": "https://i.ytimg.com/vi/K0HSD_i2DvA/hqdefault.jpg",
//!   "type": "video"
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::domain::TrackMetadata;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OEmbedResponse {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Non-empty, trimmed copy of an optional string.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl OEmbedResponse {
    /// Convert to metadata pointing at `link`.
    pub fn into_metadata(self, link: String) -> TrackMetadata {
        TrackMetadata {
            title: non_empty(self.title),
            artist: non_empty(self.author_name),
            artwork_url: non_empty(self.thumbnail_url),
            link: Some(link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_metadata_drops_blank_fields() {
        let response: OEmbedResponse = serde_json::from_str(
            r#"{"title": "One More Time", "author_name": " ", "type": "rich"}"#,
        )
        .unwrap();

        let meta = response.into_metadata("https://open.spotify.com/track/x".to_string());
        assert_eq!(meta.title.as_deref(), Some("One More Time"));
        assert_eq!(meta.artist, None);
        assert_eq!(meta.artwork_url, None);
        assert_eq!(meta.link.as_deref(), Some("https://open.spotify.com/track/x"));
    }
}
