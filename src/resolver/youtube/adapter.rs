//! Adapter layer: Convert YouTube DTOs to domain models

use super::dto;
use crate::resolver::domain::{Provider, TrackIdentifier, TrackMetadata};
use crate::resolver::oembed::{OEmbedResponse, non_empty};

/// Suffix YouTube adds to auto-generated artist channels.
const TOPIC_SUFFIX: &str = " - Topic";

/// Metadata from the oEmbed lookup.
pub fn from_oembed(id: &TrackIdentifier, response: OEmbedResponse) -> TrackMetadata {
    let mut meta = response.into_metadata(id.track_url());
    meta.artist = meta.artist.map(|artist| strip_topic(&artist));
    meta
}

/// First search result that is a video.
pub fn first_video(response: dto::SearchResponse) -> Option<TrackMetadata> {
    let item = response
        .items
        .into_iter()
        .find(|item| item.id.video_id.is_some())?;
    let video_id = item.id.video_id?;
    let snippet = item.snippet.unwrap_or_default();

    let thumbnails = snippet.thumbnails;
    let artwork_url = thumbnails
        .high
        .or(thumbnails.medium)
        .or(thumbnails.default)
        .map(|t| t.url);

    Some(TrackMetadata {
        title: non_empty(snippet.title).map(|t| decode_entities(&t)),
        artist: non_empty(snippet.channel_title).map(|c| strip_topic(&decode_entities(&c))),
        artwork_url,
        link: Some(Provider::Youtube.track_url(&video_id)),
    })
}

fn strip_topic(channel: &str) -> String {
    channel
        .strip_suffix(TOPIC_SUFFIX)
        .unwrap_or(channel)
        .to_string()
}

/// Undo the HTML escaping the Data API applies to snippet text.
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
