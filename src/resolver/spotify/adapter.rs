//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! The only place Spotify response types become [`TrackMetadata`].

use super::dto;
use crate::resolver::domain::{Provider, TrackIdentifier, TrackMetadata};
use crate::resolver::oembed::OEmbedResponse;

/// Metadata from the oEmbed lookup. The deep link always comes from the id.
pub fn from_oembed(id: &TrackIdentifier, response: OEmbedResponse) -> TrackMetadata {
    response.into_metadata(id.track_url())
}

/// First search hit, in Spotify's own relevance order.
pub fn first_hit(response: dto::SearchResponse) -> Option<TrackMetadata> {
    let track = response.tracks?.items.into_iter().next()?;

    let artist = if track.artists.is_empty() {
        None
    } else {
        Some(
            track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    let artwork_url = track
        .album
        .as_ref()
        .and_then(|album| album.images.first())
        .map(|img| img.url.clone());

    let link = track
        .external_urls
        .and_then(|urls| urls.spotify)
        .unwrap_or_else(|| Provider::Spotify.track_url(&track.id));

    Some(TrackMetadata {
        title: Some(track.name),
        artist,
        artwork_url,
        link: Some(link),
    })
}
