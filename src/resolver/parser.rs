//! Track URL parsing.
//!
//! Each supported provider contributes one or more URL shapes. The first
//! shape that matches wins; a well-formed link only ever matches one.
//! Not matching is not an error, it just means the link is unsupported.

use std::sync::LazyLock;

use regex::Regex;

use super::domain::{Provider, TrackIdentifier};

struct UrlShape {
    provider: Provider,
    pattern: Regex,
}

fn shape(provider: Provider, pattern: &str) -> UrlShape {
    UrlShape {
        provider,
        pattern: Regex::new(pattern).expect("track URL pattern must compile"),
    }
}

static SHAPES: LazyLock<Vec<UrlShape>> = LazyLock::new(|| {
    vec![
        // open.spotify.com/track/{id}, optionally with an intl-xx segment
        shape(
            Provider::Spotify,
            concat!(
                r"^(?:https?://)?open\.spotify\.com/(?:intl-[A-Za-z-]+/)?",
                r"track/([A-Za-z0-9]+)(?:[/?#]|$)",
            ),
        ),
        shape(Provider::Spotify, r"^spotify:track:([A-Za-z0-9]+)$"),
        // music.apple.com/{cc}/album/{slug}/{albumId}?i={trackId}
        shape(
            Provider::Apple,
            concat!(
                r"^(?:https?://)?(?:geo\.)?music\.apple\.com/[a-z]{2}/",
                r"album/(?:[^/?#]+/)?\d+/?\?(?:[^#]*&)?i=(\d+)(?:[&#]|$)",
            ),
        ),
        // music.apple.com/{cc}/song/[{slug}/]{id}
        shape(
            Provider::Apple,
            concat!(
                r"^(?:https?://)?(?:geo\.)?music\.apple\.com/[a-z]{2}/",
                r"song/(?:[^/?#]+/)?(\d+)(?:[/?#]|$)",
            ),
        ),
        shape(
            Provider::Youtube,
            concat!(
                r"^(?:https?://)?(?:(?:www|m|music)\.)?youtube\.com/",
                r"watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]{11})(?:[&#]|$)",
            ),
        ),
        shape(
            Provider::Youtube,
            r"^(?:https?://)?youtu\.be/([A-Za-z0-9_-]{11})(?:[/?#]|$)",
        ),
        shape(
            Provider::Youtube,
            r"^(?:https?://)?(?:(?:www|m)\.)?youtube\.com/shorts/([A-Za-z0-9_-]{11})(?:[/?#]|$)",
        ),
    ]
});

/// Parse a track link into a provider-qualified identifier.
///
/// Returns `None` for anything that isn't a supported track link.
pub fn parse(url: &str) -> Option<TrackIdentifier> {
    let input = url.trim();
    if input.is_empty() {
        return None;
    }

    SHAPES.iter().find_map(|shape| {
        let captures = shape.pattern.captures(input)?;
        let id = captures.get(1)?.as_str();
        Some(TrackIdentifier::new(shape.provider, id))
    })
}
