//! Spotify HTTP client
//!
//! Lookups go through oEmbed and need no credentials. Searches need an app
//! token from the client-credentials flow; without configured credentials
//! the search pathway reports [`Degraded::CredentialMissing`].
//!
//! A `401` from the Web API invalidates the cached token so the next search
//! re-authenticates (credential rotation, clock skew).

use std::sync::Arc;

use super::{adapter, dto};
use crate::config::Endpoints;
use crate::resolver::domain::{Degraded, Provider, TrackIdentifier, TrackMetadata};
use crate::resolver::http::{FetchRequest, HttpFetcher};
use crate::resolver::oembed::OEmbedResponse;
use crate::resolver::token::ClientCredentialTokenCache;

/// Spotify client
pub struct SpotifyClient {
    fetcher: HttpFetcher,
    tokens: Option<Arc<ClientCredentialTokenCache>>,
    oembed_base: String,
    api_base: String,
}

impl SpotifyClient {
    /// Create a client. `tokens` is `None` when no credentials are configured.
    pub fn new(
        fetcher: HttpFetcher,
        endpoints: &Endpoints,
        tokens: Option<Arc<ClientCredentialTokenCache>>,
    ) -> Self {
        Self {
            fetcher,
            tokens,
            oembed_base: endpoints.spotify_oembed.trim_end_matches('/').to_string(),
            api_base: endpoints.spotify_api.trim_end_matches('/').to_string(),
        }
    }

    /// Look up title and artwork for a track via oEmbed
    pub async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
        let url = format!(
            "{}/oembed?url={}",
            self.oembed_base,
            urlencoding::encode(&id.track_url())
        );

        let response: OEmbedResponse = self
            .fetcher
            .fetch_json(&url, FetchRequest::get())
            .await
            .map_err(|e| Degraded::upstream(Provider::Spotify, e))?
            .ok_or_else(|| Degraded::upstream(Provider::Spotify, "empty oEmbed response"))?;

        Ok(adapter::from_oembed(id, response))
    }

    /// Search tracks and return the first hit
    pub async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
        let Some(tokens) = &self.tokens else {
            return Err(Degraded::CredentialMissing {
                provider: Provider::Spotify,
            });
        };

        let Some(token) = tokens.get_token().await else {
            return Err(Degraded::upstream(Provider::Spotify, "no access token"));
        };

        let url = format!(
            "{}/v1/search?q={}&type=track&limit=1",
            self.api_base,
            urlencoding::encode(query)
        );

        let response = self
            .fetcher
            .fetch_json::<dto::SearchResponse>(&url, FetchRequest::get().bearer(token))
            .await
            .map_err(|e| {
                if e.status_code() == Some(401) {
                    tokens.invalidate();
                }
                Degraded::upstream(Provider::Spotify, e)
            })?;

        Ok(response.and_then(adapter::first_hit))
    }
}
