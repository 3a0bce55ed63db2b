//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
///
/// Implementations report failures honestly; deciding to ignore them is the
/// caller's job (see [`crate::application::services::NewsService`]).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A string key/value store with per-key expiration.
///
/// Implementations must be safe to share between concurrent requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache (`GET` / `SET EX`)
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process bounded TTL cache (`moka`)
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on hit
    /// - `Ok(None)` on miss or when the entry has expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend could not be queried.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend rejected or could not receive the write.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health output and logs.
    fn backend(&self) -> &'static str;
}
