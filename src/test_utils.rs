//! Test utilities and fixtures for tracklink tests.
//!
//! Provides mock provider tables and endpoint overrides so tests can run
//! the full resolution pipeline without the real upstreams.
//!
//! # Example
//!
//! ```ignore
//! use tracklink::test_utils::{mock_service, three_providers};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (spotify, apple, youtube) = three_providers();
//!     let service = mock_service(&spotify, &apple, &youtube);
//!     // ... test logic
//! }
//! ```

use std::sync::Arc;

use crate::config::Endpoints;
use crate::resolver::share::ShareRegistry;
use crate::resolver::traits::ProviderApi;
use crate::resolver::traits::mocks::MockProvider;
use crate::resolver::{Provider, ResolverService};

/// Public URL used by services built here.
pub const TEST_PUBLIC_URL: &str = "http://localhost:3000";

/// Point every upstream at one mock server.
pub fn endpoints_for(base: &str) -> Endpoints {
    let base = base.trim_end_matches('/');
    Endpoints {
        spotify_token_url: format!("{base}/api/token"),
        spotify_api: base.to_string(),
        spotify_oembed: base.to_string(),
        itunes: base.to_string(),
        youtube_oembed: base.to_string(),
        youtube_api: base.to_string(),
    }
}

/// A happy-path provider table: Spotify knows the track, the other two
/// find it by search.
pub fn three_providers() -> (Arc<MockProvider>, Arc<MockProvider>, Arc<MockProvider>) {
    (
        Arc::new(MockProvider::with_track(
            Provider::Spotify,
            "One More Time",
            "Daft Punk",
        )),
        Arc::new(MockProvider::with_hit(
            Provider::Apple,
            "https://music.apple.com/us/song/697195787",
        )),
        Arc::new(MockProvider::with_hit(
            Provider::Youtube,
            "https://www.youtube.com/watch?v=FGBhQbmPwH8",
        )),
    )
}

/// Service over the given mocks with an in-memory share registry.
///
/// Keeps the caller's `Arc`s so call counters stay observable.
pub fn mock_service(
    spotify: &Arc<MockProvider>,
    apple: &Arc<MockProvider>,
    youtube: &Arc<MockProvider>,
) -> ResolverService {
    let providers: Vec<Arc<dyn ProviderApi>> =
        vec![spotify.clone(), apple.clone(), youtube.clone()];
    ResolverService::new(providers, ShareRegistry::in_memory(), TEST_PUBLIC_URL)
}
