//! Trait definitions for provider API clients.
//!
//! The engine only talks to providers through [`ProviderApi`], so tests can
//! substitute [`mocks::MockProvider`] for the real HTTP clients.

use async_trait::async_trait;

use super::apple::AppleMusicClient;
use super::domain::{Degraded, Provider, TrackIdentifier, TrackMetadata};
use super::spotify::SpotifyClient;
use super::youtube::YouTubeClient;

/// One music platform, as seen by the resolver.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// Which platform this client talks to.
    fn provider(&self) -> Provider;

    /// Metadata for a track on this provider, by its own id.
    async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded>;

    /// Keyword search. `Ok(None)` means the provider answered with no hits.
    async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded>;
}

// Implement traits for real clients

#[async_trait]
impl ProviderApi for SpotifyClient {
    fn provider(&self) -> Provider {
        Provider::Spotify
    }

    async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
        self.lookup(id).await
    }

    async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
        self.search(query).await
    }
}

#[async_trait]
impl ProviderApi for AppleMusicClient {
    fn provider(&self) -> Provider {
        Provider::Apple
    }

    async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
        self.lookup(id).await
    }

    async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
        self.search(query).await
    }
}

#[async_trait]
impl ProviderApi for YouTubeClient {
    fn provider(&self) -> Provider {
        Provider::Youtube
    }

    async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
        self.lookup(id).await
    }

    async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
        self.search(query).await
    }
}

/// Mock provider for testing.
///
/// Returns configurable responses and counts calls.
#[cfg(test)]
pub mod mocks {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;

    /// Mock provider that returns predefined results.
    pub struct MockProvider {
        pub provider: Provider,
        /// Result of every lookup
        pub lookup_result: Result<TrackMetadata, Degraded>,
        /// Result of every search
        pub search_result: Result<Option<TrackMetadata>, Degraded>,
        /// Artificial latency applied to each call
        pub delay: Option<Duration>,
        lookups: AtomicUsize,
        searches: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    impl MockProvider {
        /// A provider that knows nothing and finds nothing.
        pub fn empty(provider: Provider) -> Self {
            Self {
                provider,
                lookup_result: Err(Degraded::upstream(provider, "mock: no data")),
                search_result: Ok(None),
                delay: None,
                lookups: AtomicUsize::new(0),
                searches: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }
        }

        /// A provider whose lookups succeed with `title`/`artist`.
        pub fn with_track(provider: Provider, title: &str, artist: &str) -> Self {
            Self {
                lookup_result: Ok(TrackMetadata {
                    title: Some(title.to_string()),
                    artist: Some(artist.to_string()),
                    artwork_url: Some(format!("https://img.example.com/{}.jpg", provider)),
                    link: None,
                }),
                ..Self::empty(provider)
            }
        }

        /// A provider whose searches return a hit at `link`.
        pub fn with_hit(provider: Provider, link: &str) -> Self {
            Self {
                search_result: Ok(Some(TrackMetadata {
                    link: Some(link.to_string()),
                    ..Default::default()
                })),
                ..Self::empty(provider)
            }
        }

        /// A provider where every call fails.
        pub fn failing(provider: Provider) -> Self {
            Self {
                search_result: Err(Degraded::upstream(provider, "mock: unavailable")),
                ..Self::empty(provider)
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn lookup_calls(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        pub fn search_calls(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }

        /// Every query passed to `search`, in call order.
        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().clone()
        }

        async fn pause(&self) {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl ProviderApi for MockProvider {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            let mut meta = self.lookup_result.clone()?;
            if meta.link.is_none() {
                meta.link = Some(id.track_url());
            }
            Ok(meta)
        }

        async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().push(query.to_string());
            self.pause().await;
            self.search_result.clone()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_lookup_fills_link() {
            let mock = MockProvider::with_track(Provider::Spotify, "Song", "Artist");
            let id = TrackIdentifier::new(Provider::Spotify, "abc");
            let meta = mock.lookup(&id).await.unwrap();
            assert_eq!(meta.link.as_deref(), Some("https://open.spotify.com/track/abc"));
            assert_eq!(mock.lookup_calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_records_queries() {
            let mock = MockProvider::with_hit(Provider::Apple, "https://music.apple.com/us/song/1");
            let hit = mock.search("Song Artist").await.unwrap();
            assert!(hit.is_some());
            assert_eq!(mock.queries(), vec!["Song Artist".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_failing() {
            let mock = MockProvider::failing(Provider::Youtube);
            assert!(mock.search("x").await.is_err());
            assert!(mock.lookup(&TrackIdentifier::new(Provider::Youtube, "x")).await.is_err());
        }
    }
}
