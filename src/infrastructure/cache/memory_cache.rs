//! In-process cache with per-entry expiry and a size bound.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

/// Entry limit used by [`MemoryCache::new`].
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was last written with.
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// A process-local cache used when no Redis is configured.
///
/// Backed by `moka`: entries expire after their TTL, and once `max_entries`
/// is reached the least useful entries are evicted. Contents are lost on
/// restart and are not shared between instances.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<String, Entry>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding at most `max_entries` entries.
    pub fn with_capacity(max_entries: u64) -> Self {
        debug!(max_entries, "Using MemoryCache (in-process)");

        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryExpiry)
            .build();

        Self { entries }
    }

    /// Number of live entries.
    ///
    /// Applies pending evictions first, so the count is exact at the time of the call.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.entries
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl: Duration::from_secs(ttl_seconds),
                },
            )
            .await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();

        cache.set("k", "v", 600).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let cache = MemoryCache::new();
        assert!(cache.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();

        cache.set("k", "v", 1).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1_200)).await;

        assert!(cache.get("k").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let cache = MemoryCache::new();

        cache.set("k", "first", 600).await.unwrap();
        cache.set("k", "second", 600).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("second"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_bounds_live_entries() {
        let cache = MemoryCache::with_capacity(100);

        for i in 0..5_000 {
            cache
                .set(&format!("news:search:{i}"), "{}", 600)
                .await
                .unwrap();
        }

        let len = cache.len().await;
        assert!(len <= 100, "memory cache grew to {len}");
        assert!(cache.health_check().await);
    }
}
