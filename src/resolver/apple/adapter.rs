//! Adapter layer: Convert iTunes DTOs to domain models

use super::dto;
use crate::resolver::domain::{Provider, TrackMetadata};
use crate::resolver::oembed::non_empty;

/// Artwork size requested from the mzstatic image server.
const ARTWORK_SIZE: &str = "600x600";

/// First result that is actually a song.
pub fn first_song(response: dto::ResultsResponse) -> Option<TrackMetadata> {
    let song = response
        .results
        .into_iter()
        .find(|song| song.track_name.is_some())?;

    let link = non_empty(song.track_view_url)
        .or_else(|| song.track_id.map(|id| Provider::Apple.track_url(&id.to_string())));

    Some(TrackMetadata {
        title: non_empty(song.track_name),
        artist: non_empty(song.artist_name),
        artwork_url: non_empty(song.artwork_url100).map(|url| upscale_artwork(&url)),
        link,
    })
}

/// Rewrite the `100x100` thumbnail URL to a larger rendition.
pub fn upscale_artwork(url: &str) -> String {
    url.replace("100x100", ARTWORK_SIZE)
}
