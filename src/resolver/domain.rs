//! Internal domain models for track resolution.
//!
//! These types are OUR types - they don't change when provider APIs change.
//! Every provider response gets converted into [`TrackMetadata`] by that
//! provider's adapter before the rest of the engine sees it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title used when no provider could tell us the real one.
pub const UNKNOWN_TITLE: &str = "Unknown Track";
/// Artist used when no provider could tell us the real one.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A supported music platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Spotify,
    Apple,
    Youtube,
}

impl Provider {
    /// Every provider, in output order.
    pub const ALL: [Provider; 3] = [Provider::Spotify, Provider::Apple, Provider::Youtube];

    /// Stable machine name, also the canonical key prefix.
    pub fn name(self) -> &'static str {
        match self {
            Provider::Spotify => "spotify",
            Provider::Apple => "apple",
            Provider::Youtube => "youtube",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Spotify => "Spotify",
            Provider::Apple => "Apple Music",
            Provider::Youtube => "YouTube",
        }
    }

    /// Track page URL built from a provider track id alone.
    pub fn track_url(self, provider_track_id: &str) -> String {
        match self {
            Provider::Spotify => format!("https://open.spotify.com/track/{provider_track_id}"),
            Provider::Apple => format!("https://music.apple.com/us/song/{provider_track_id}"),
            Provider::Youtube => format!("https://www.youtube.com/watch?v={provider_track_id}"),
        }
    }

    /// Keyword search URL on this provider.
    pub fn search_url(self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        match self {
            Provider::Spotify => format!("https://open.spotify.com/search/{encoded}"),
            Provider::Apple => format!("https://music.apple.com/us/search?term={encoded}"),
            Provider::Youtube => {
                format!("https://www.youtube.com/results?search_query={encoded}")
            }
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provider-qualified track id, derived once from the input URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackIdentifier {
    pub provider: Provider,
    pub provider_track_id: String,
}

impl TrackIdentifier {
    pub fn new(provider: Provider, provider_track_id: impl Into<String>) -> Self {
        Self {
            provider,
            provider_track_id: provider_track_id.into(),
        }
    }

    /// `provider:providerTrackId`, the identity of a track in this system.
    pub fn canonical_key(&self) -> String {
        format!("{}:{}", self.provider, self.provider_track_id)
    }

    /// Direct link to the track on its own provider.
    pub fn track_url(&self) -> String {
        self.provider.track_url(&self.provider_track_id)
    }
}

impl fmt::Display for TrackIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.provider_track_id)
    }
}

/// Partial track metadata reported by a single provider call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub artwork_url: Option<String>,
    /// Direct link to the track on the provider that produced this metadata
    pub link: Option<String>,
}

impl TrackMetadata {
    /// Fill missing title/artist/artwork from `other`, never overwriting
    /// values we already have. The link is provider-specific and not merged.
    pub fn merge(&mut self, other: &TrackMetadata) {
        if self.title.is_none() {
            self.title = other.title.clone();
        }
        if self.artist.is_none() {
            self.artist = other.artist.clone();
        }
        if self.artwork_url.is_none() {
            self.artwork_url = other.artwork_url.clone();
        }
    }

    /// Search text for other providers: `"{title} {artist}"`, with the
    /// placeholder standing in for any field that is still unknown.
    pub fn query(&self) -> String {
        let title = non_blank(self.title.as_deref()).unwrap_or(UNKNOWN_TITLE);
        let artist = non_blank(self.artist.as_deref()).unwrap_or(UNKNOWN_ARTIST);
        format!("{title} {artist}")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// One provider entry in a resolved track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLink {
    pub name: Provider,
    pub display_name: String,
    pub deep_link: Option<String>,
    /// True iff `deep_link` points at the track itself
    pub is_available: bool,
    pub fallback_search_link: Option<String>,
}

/// The canonical record for a track, created once per canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTrack {
    pub canonical_key: String,
    pub title: String,
    pub artist: String,
    #[serde(rename = "artwork")]
    pub artwork_url: Option<String>,
    pub providers: Vec<ProviderLink>,
}

impl ResolvedTrack {
    pub fn link(&self, provider: Provider) -> Option<&ProviderLink> {
        self.providers.iter().find(|link| link.name == provider)
    }
}

/// Why a single provider call contributed nothing.
///
/// Always absorbed by the engine; never surfaced as a resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Degraded {
    #[error("{provider} unavailable: {reason}")]
    UpstreamUnavailable { provider: Provider, reason: String },

    #[error("{provider} is not configured")]
    CredentialMissing { provider: Provider },
}

impl Degraded {
    pub fn upstream(provider: Provider, reason: impl ToString) -> Self {
        Self::UpstreamUnavailable {
            provider,
            reason: reason.to_string(),
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            Degraded::UpstreamUnavailable { provider, .. } => *provider,
            Degraded::CredentialMissing { provider } => *provider,
        }
    }
}

/// Errors that reach the caller of a resolution or share lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Unsupported URL format: {0}")]
    UnsupportedLink(String),

    #[error("Not found: {0}")]
    RegistryMiss(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolveError {
    pub fn http_status(&self) -> u16 {
        match self {
            ResolveError::UnsupportedLink(_) => 400,
            ResolveError::RegistryMiss(_) => 404,
            ResolveError::Internal(_) => 500,
        }
    }
}
