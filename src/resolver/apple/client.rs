//! iTunes Search API client
//!
//! Note: the API answers with `text/javascript` content, so the body is
//! decoded as JSON regardless of the content type.

use super::{adapter, dto};
use crate::config::Endpoints;
use crate::resolver::domain::{Degraded, Provider, TrackIdentifier, TrackMetadata};
use crate::resolver::http::{FetchRequest, HttpFetcher};

/// Apple Music client
pub struct AppleMusicClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl AppleMusicClient {
    pub fn new(fetcher: HttpFetcher, endpoints: &Endpoints) -> Self {
        Self {
            fetcher,
            base_url: endpoints.itunes.trim_end_matches('/').to_string(),
        }
    }

    /// Look up a song by its numeric track id
    pub async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
        let url = format!(
            "{}/lookup?id={}&entity=song",
            self.base_url,
            urlencoding::encode(&id.provider_track_id)
        );

        let mut meta = self.send(&url).await?.ok_or_else(|| {
            Degraded::upstream(
                Provider::Apple,
                format!("no song with id {}", id.provider_track_id),
            )
        })?;

        if meta.link.is_none() {
            meta.link = Some(id.track_url());
        }
        Ok(meta)
    }

    /// Keyword search; first song result only
    pub async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
        let url = format!(
            "{}/search?term={}&entity=song&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        self.send(&url).await
    }

    async fn send(&self, url: &str) -> Result<Option<TrackMetadata>, Degraded> {
        let response = self
            .fetcher
            .fetch_json::<dto::ResultsResponse>(url, FetchRequest::get())
            .await
            .map_err(|e| Degraded::upstream(Provider::Apple, e))?;

        Ok(response.and_then(adapter::first_song))
    }
}
