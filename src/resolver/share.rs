//! Short share ids.
//!
//! Every resolution request gets a fresh short id mapping to the track's
//! canonical key; many ids may point at one key. Ids that collide with an
//! existing entry are rejected and regenerated. Entries live for the
//! lifetime of the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;

use super::domain::ResolveError;

/// Length of a generated short id.
pub const SHORT_ID_LEN: usize = 8;

/// Attempts at finding an unused short id before giving up.
pub const MAX_ATTEMPTS: usize = 5;

/// One `shortId -> canonicalKey` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlEntry {
    pub short_id: String,
    pub canonical_key: String,
}

/// Storage for share entries.
#[async_trait]
pub trait ShareStore: Send + Sync + 'static {
    /// Store `entry` unless its short id is taken. Returns `false` on conflict.
    async fn insert_if_absent(&self, entry: ShortUrlEntry) -> Result<bool, ResolveError>;

    /// Canonical key for a short id, `None` if it was never registered.
    async fn get(&self, short_id: &str) -> Result<Option<String>, ResolveError>;

    /// Number of stored entries.
    async fn len(&self) -> usize;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryShareStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryShareStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn insert_if_absent(&self, entry: ShortUrlEntry) -> Result<bool, ResolveError> {
        let mut entries = self.entries.write();
        if entries.contains_key(&entry.short_id) {
            return Ok(false);
        }
        entries.insert(entry.short_id, entry.canonical_key);
        Ok(true)
    }

    async fn get(&self, short_id: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.entries.read().get(short_id).cloned())
    }

    async fn len(&self) -> usize {
        self.entries.read().len()
    }
}

type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Random URL-safe short id.
pub fn generate_short_id() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SHORT_ID_LEN)
        .map(char::from)
        .collect()
}

/// Assigns short ids to canonical keys.
pub struct ShareRegistry {
    store: Arc<dyn ShareStore>,
    generate: IdGenerator,
}

impl ShareRegistry {
    pub fn new(store: Arc<dyn ShareStore>) -> Self {
        Self {
            store,
            generate: Box::new(generate_short_id),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryShareStore::new()))
    }

    /// Use a custom id source (deterministic ids in tests).
    pub fn with_generator(
        store: Arc<dyn ShareStore>,
        generate: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            generate: Box::new(generate),
        }
    }

    /// Register a new short id for `canonical_key`.
    pub async fn register(&self, canonical_key: &str) -> Result<String, ResolveError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let short_id = (self.generate)();
            let entry = ShortUrlEntry {
                short_id: short_id.clone(),
                canonical_key: canonical_key.to_string(),
            };

            if self.store.insert_if_absent(entry).await? {
                tracing::debug!(%short_id, %canonical_key, "Registered share id");
                return Ok(short_id);
            }
            tracing::warn!(%short_id, attempt, "Short id collision, retrying");
        }

        Err(ResolveError::Internal(format!(
            "no free short id after {MAX_ATTEMPTS} attempts"
        )))
    }

    /// Canonical key registered under `short_id`.
    pub async fn resolve(&self, short_id: &str) -> Result<String, ResolveError> {
        self.store
            .get(short_id)
            .await?
            .ok_or_else(|| ResolveError::RegistryMiss(short_id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator that replays `ids` in order, repeating the last one.
    fn scripted(ids: &[&str]) -> impl Fn() -> String + Send + Sync + 'static {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        let next = AtomicUsize::new(0);
        move || {
            let i = next.fetch_add(1, Ordering::SeqCst).min(ids.len() - 1);
            ids[i].clone()
        }
    }

    #[test]
    fn test_generate_short_id_shape() {
        for _ in 0..100 {
            let id = generate_short_id();
            assert_eq!(id.len(), SHORT_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[tokio::test]
    async fn test_register_then_resolve() {
        let registry = ShareRegistry::in_memory();
        let id = registry.register("spotify:abc123").await.unwrap();
        assert_eq!(registry.resolve(&id).await.unwrap(), "spotify:abc123");
    }

    #[tokio::test]
    async fn test_new_id_per_registration() {
        let registry = ShareRegistry::in_memory();
        let a = registry.register("spotify:abc123").await.unwrap();
        let b = registry.register("spotify:abc123").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_registry_miss() {
        let registry = ShareRegistry::in_memory();
        let err = registry.resolve("nope").await.unwrap_err();
        assert_eq!(err, ResolveError::RegistryMiss("nope".to_string()));
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn test_collision_is_retried() {
        let store = Arc::new(MemoryShareStore::new());
        let ids = scripted(&["AAAAAAAA", "AAAAAAAA", "BBBBBBBB"]);
        let registry = ShareRegistry::with_generator(store, ids);

        assert_eq!(registry.register("apple:1").await.unwrap(), "AAAAAAAA");
        assert_eq!(registry.register("apple:2").await.unwrap(), "BBBBBBBB");
        // First mapping untouched
        assert_eq!(registry.resolve("AAAAAAAA").await.unwrap(), "apple:1");
    }

    #[tokio::test]
    async fn test_collision_exhaustion_is_internal() {
        let store = Arc::new(MemoryShareStore::new());
        let registry = ShareRegistry::with_generator(store, scripted(&["SAMESAME"]));

        registry.register("apple:1").await.unwrap();
        let err = registry.register("apple:2").await.unwrap_err();
        assert!(matches!(err, ResolveError::Internal(_)));
        assert_eq!(err.http_status(), 500);
        assert_eq!(registry.len().await, 1);
    }
}
