//! Cross-provider enrichment.
//!
//! Searches every provider that has no confirmed link yet for
//! `"{title} {artist}"`, takes the first hit of each, and folds the hits
//! back into the track: links are added, missing title/artist/artwork are
//! filled, confirmed values are never overwritten. Unknown fields are
//! searched as their placeholders.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;

use super::domain::{Provider, TrackMetadata};
use super::traits::ProviderApi;

/// Work-in-progress state of a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Best metadata so far; `None` fields are still unknown
    pub metadata: TrackMetadata,
    /// Confirmed direct links, by provider
    pub links: BTreeMap<Provider, String>,
}

impl Enrichment {
    /// Start from the primary lookup's result.
    pub fn from_primary(provider: Provider, metadata: TrackMetadata) -> Self {
        let mut links = BTreeMap::new();
        if let Some(link) = &metadata.link {
            links.insert(provider, link.clone());
        }
        Self { metadata, links }
    }
}

/// Fills in other providers' links by keyword search.
pub struct CrossProviderEnricher {
    providers: Vec<Arc<dyn ProviderApi>>,
}

impl CrossProviderEnricher {
    pub fn new(providers: Vec<Arc<dyn ProviderApi>>) -> Self {
        Self { providers }
    }

    /// Search the providers that still lack a link.
    ///
    /// Never fails: a provider that errors or has no hit contributes nothing.
    pub async fn enrich(&self, mut state: Enrichment) -> Enrichment {
        let query = state.metadata.query();

        let pending: Vec<&Arc<dyn ProviderApi>> = self
            .providers
            .iter()
            .filter(|p| !state.links.contains_key(&p.provider()))
            .collect();

        if pending.is_empty() {
            return state;
        }

        tracing::debug!(query = %query, providers = pending.len(), "Searching other providers");

        let results = join_all(pending.iter().map(|p| p.search(&query))).await;

        for (api, result) in pending.iter().zip(results) {
            let provider = api.provider();
            match result {
                Ok(Some(hit)) => {
                    state.metadata.merge(&hit);
                    if let Some(link) = hit.link {
                        state.links.insert(provider, link);
                    }
                }
                Ok(None) => {
                    tracing::debug!(%provider, "No search hits");
                }
                Err(e) => {
                    tracing::warn!(%provider, "Search degraded: {}", e);
                }
            }
        }

        state
    }
}
