//! Client-credential access token cache.
//!
//! Two states: empty, or holding a token that is valid until
//! `expires_at_epoch_ms`. A lookup inside the validity window never touches
//! the network. Refreshes happen outside the lock, so two callers that both
//! see an empty cache may both fetch a token; the last successful one wins.
//! A failed exchange leaves the cache as it found it.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::Mutex;
use serde::Deserialize;

use super::http::{FetchError, FetchRequest, HttpFetcher};

/// Tokens are treated as expired this long before the provider says so.
pub const EXPIRY_MARGIN_MS: i64 = 60_000;

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock, for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A bearer token and the moment we stop trusting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at_epoch_ms: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// Obtains and caches an app-level OAuth token.
pub struct ClientCredentialTokenCache {
    fetcher: HttpFetcher,
    token_url: String,
    client_id: String,
    client_secret: String,
    clock: Arc<dyn Clock>,
    state: Mutex<Option<CachedToken>>,
}

impl ClientCredentialTokenCache {
    pub fn new(
        fetcher: HttpFetcher,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            clock: Arc::new(SystemClock),
            state: Mutex::new(None),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current token, fetching a new one if the cache is empty or lapsed.
    ///
    /// `None` means the token exchange failed; callers treat the provider as
    /// unavailable for now.
    pub async fn get_token(&self) -> Option<String> {
        let now = self.clock.now_millis();
        let cached = {
            let state = self.state.lock();
            state
                .as_ref()
                .filter(|token| now < token.expires_at_epoch_ms)
                .map(|token| token.value.clone())
        };
        if cached.is_some() {
            tracing::trace!("Client credential token cache hit");
            return cached;
        }

        match self.refresh(now).await {
            Ok(token) => {
                let value = token.value.clone();
                *self.state.lock() = Some(token);
                tracing::debug!("Obtained client credential token from {}", self.token_url);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("Client credential token exchange failed: {}", e);
                None
            }
        }
    }

    /// Drop the cached token so the next call re-authenticates.
    pub fn invalidate(&self) {
        if self.state.lock().take().is_some() {
            tracing::debug!("Client credential token invalidated");
        }
    }

    /// Snapshot of the cached token, if any.
    pub fn cached(&self) -> Option<CachedToken> {
        self.state.lock().clone()
    }

    async fn refresh(&self, now: i64) -> Result<CachedToken, FetchError> {
        let request = FetchRequest::post()
            .basic_auth(&self.client_id, &self.client_secret)
            .form_body("grant_type=client_credentials");

        let response: TokenResponse = self
            .fetcher
            .fetch_json(&self.token_url, request)
            .await?
            .ok_or_else(|| FetchError::ResponseFormat {
                url: self.token_url.clone(),
                message: "empty token response".to_string(),
            })?;

        Ok(CachedToken {
            value: response.access_token,
            expires_at_epoch_ms: now
                .saturating_add(response.expires_in.saturating_mul(1000))
                .saturating_sub(EXPIRY_MARGIN_MS),
        })
    }
}
