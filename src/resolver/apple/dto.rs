//! iTunes Search API Data Transfer Objects
//!
//! The same envelope is returned by `/lookup` and `/search`.
//! DO NOT use these types outside the apple module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "resultCount": 1,
//!   "results": [{
//!     "wrapperType": "track",
//!     "kind": "song",
//!     "trackId": 697195787,
//!     "trackName": "One More Time",
//!     "artistName": "Daft Punk",
//!     "artworkUrl100": "https://is1-ssl.mzstatic.com/image/thumb/.../100x100bb.jpg",
//!     "trackViewUrl": "https://music.apple.com/us/album/one-more-time/697194953?i=697195787&uo=4"
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<Song>,
}

/// A single result. Lookups of album ids also return collection rows,
/// which have no `trackName`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub wrapper_type: Option<String>,
    pub track_id: Option<u64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub artwork_url100: Option<String>,
    pub track_view_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup_response() {
        let json = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "kind": "song",
                "trackId": 697195787,
                "trackName": "One More Time",
                "artistName": "Daft Punk",
                "collectionName": "Discovery",
                "artworkUrl100": "https://is1-ssl.mzstatic.com/image/thumb/x/100x100bb.jpg",
                "trackViewUrl": "https://music.apple.com/us/song/one-more-time/697195787?uo=4"
            }]
        }"#;

        let response: ResultsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result_count, 1);
        let song = &response.results[0];
        assert_eq!(song.track_id, Some(697195787));
        assert_eq!(song.track_name.as_deref(), Some("One More Time"));
        assert!(song.artwork_url100.as_deref().unwrap().ends_with("100x100bb.jpg"));
    }

    #[test]
    fn test_parse_no_results() {
        let response: ResultsResponse =
            serde_json::from_str(r#"{"resultCount": 0, "results": []}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
