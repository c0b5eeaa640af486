//! Resolver service - orchestrates a full track resolution
//!
//! This is the high-level API:
//! 1. Parse the input URL into a [`TrackIdentifier`]
//! 2. Primary lookup on the identifier's own provider
//! 3. Keyword search on the other providers
//! 4. Build per-provider links
//! 5. Register a short share id
//!
//! Steps 2-4 run once per canonical key. Later requests for the same key
//! get the cached [`ResolvedTrack`] without touching the network, and
//! concurrent first requests share one in-flight resolution.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use super::apple::AppleMusicClient;
use super::domain::{
    Provider, ResolveError, ResolvedTrack, TrackIdentifier, TrackMetadata, UNKNOWN_ARTIST,
    UNKNOWN_TITLE,
};
use super::enricher::{CrossProviderEnricher, Enrichment};
use super::http::HttpFetcher;
use super::links::build_links;
use super::parser;
use super::share::ShareRegistry;
use super::spotify::SpotifyClient;
use super::token::ClientCredentialTokenCache;
use super::traits::ProviderApi;
use super::youtube::YouTubeClient;
use crate::config::Config;

type TrackSlot = Arc<OnceCell<Arc<ResolvedTrack>>>;

/// Outcome of resolving one URL.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub track: Arc<ResolvedTrack>,
    pub short_id: String,
    pub short_url: String,
    /// The URL as submitted (trimmed)
    pub source_url: String,
}

/// Owns the provider table, the track cache and the share registry.
pub struct ResolverService {
    providers: Vec<Arc<dyn ProviderApi>>,
    enricher: CrossProviderEnricher,
    shares: ShareRegistry,
    public_url: String,
    tracks: Mutex<HashMap<String, TrackSlot>>,
}

impl ResolverService {
    /// Create a service over an explicit provider table.
    pub fn new(
        providers: Vec<Arc<dyn ProviderApi>>,
        shares: ShareRegistry,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            enricher: CrossProviderEnricher::new(providers.clone()),
            providers,
            shares,
            public_url: public_url.into().trim_end_matches('/').to_string(),
            tracks: Mutex::new(HashMap::new()),
        }
    }

    /// Wire up the real provider clients from configuration.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        let endpoints = &config.endpoints;

        let tokens = config.credentials.spotify().map(|(id, secret)| {
            Arc::new(ClientCredentialTokenCache::new(
                fetcher.clone(),
                endpoints.spotify_token_url.clone(),
                id,
                secret,
            ))
        });
        if tokens.is_none() {
            tracing::warn!("Spotify credentials not configured, Spotify search disabled");
        }

        let youtube_key = config.credentials.youtube().map(str::to_string);
        if youtube_key.is_none() {
            tracing::warn!("YouTube API key not configured, YouTube search disabled");
        }

        let providers: Vec<Arc<dyn ProviderApi>> = vec![
            Arc::new(SpotifyClient::new(fetcher.clone(), endpoints, tokens)),
            Arc::new(AppleMusicClient::new(fetcher.clone(), endpoints)),
            Arc::new(YouTubeClient::new(fetcher, endpoints, youtube_key)),
        ];

        Ok(Self::new(
            providers,
            ShareRegistry::in_memory(),
            config.server.public_url.clone(),
        ))
    }

    /// Resolve a pasted URL and register a fresh short id for it.
    pub async fn resolve_url(&self, url: &str) -> Result<Resolution, ResolveError> {
        let source_url = url.trim();
        let id = parser::parse(source_url)
            .ok_or_else(|| ResolveError::UnsupportedLink(source_url.to_string()))?;

        let track = self.resolve_identifier(&id).await;
        let short_id = self.shares.register(&track.canonical_key).await?;

        Ok(Resolution {
            short_url: self.short_url(&short_id),
            short_id,
            track,
            source_url: source_url.to_string(),
        })
    }

    /// The track for `id`, resolving it on first use. Never fails.
    pub async fn resolve_identifier(&self, id: &TrackIdentifier) -> Arc<ResolvedTrack> {
        let key = id.canonical_key();
        let slot = {
            let mut tracks = self.tracks.lock();
            tracks.entry(key.clone()).or_default().clone()
        };

        if let Some(track) = slot.get() {
            tracing::debug!(canonical_key = %key, "Track cache hit");
            return track.clone();
        }

        slot.get_or_init(|| async {
            tracing::debug!(canonical_key = %key, "Track cache miss");
            Arc::new(self.build(id).await)
        })
        .await
        .clone()
    }

    /// Cached track for a canonical key, if it has been resolved.
    pub fn cached(&self, canonical_key: &str) -> Option<Arc<ResolvedTrack>> {
        self.tracks
            .lock()
            .get(canonical_key)
            .and_then(|slot| slot.get().cloned())
    }

    /// Track behind a short id.
    pub async fn lookup_share(&self, short_id: &str) -> Result<Arc<ResolvedTrack>, ResolveError> {
        let key = self.shares.resolve(short_id).await?;
        self.cached(&key)
            .ok_or_else(|| ResolveError::RegistryMiss(short_id.to_string()))
    }

    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}/s/{}", self.public_url, short_id)
    }

    fn provider(&self, provider: Provider) -> Option<&Arc<dyn ProviderApi>> {
        self.providers.iter().find(|p| p.provider() == provider)
    }

    async fn build(&self, id: &TrackIdentifier) -> ResolvedTrack {
        let primary = match self.provider(id.provider) {
            Some(api) => match api.lookup(id).await {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::warn!(identifier = %id, "Primary lookup degraded: {}", e);
                    TrackMetadata::default()
                }
            },
            None => {
                tracing::warn!(identifier = %id, "No client for provider");
                TrackMetadata::default()
            }
        };

        // The identifier alone is enough for a direct link
        let primary = TrackMetadata {
            link: primary.link.or_else(|| Some(id.track_url())),
            ..primary
        };

        let state = self
            .enricher
            .enrich(Enrichment::from_primary(id.provider, primary))
            .await;

        let query = state.metadata.query();
        let providers = build_links(&state.links, Some(&query));
        let metadata = state.metadata;

        let track = ResolvedTrack {
            canonical_key: id.canonical_key(),
            title: metadata.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: metadata.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            artwork_url: metadata.artwork_url,
            providers,
        };

        tracing::info!(
            canonical_key = %track.canonical_key,
            title = %track.title,
            artist = %track.artist,
            direct_links = track.providers.iter().filter(|p| p.is_available).count(),
            "Resolved track"
        );

        track
    }
}
