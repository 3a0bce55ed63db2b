//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache for normalized news results.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Unlike a fail-open cache, errors are returned to the caller so the
/// read-through layer can log and absorb them in one place.
#[derive(Clone)]
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }

    /// Remaining lifetime of `key` in seconds.
    ///
    /// Returns `None` if the key does not exist or has no expiry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationError`] if the TTL command fails.
    pub async fn ttl(&self, key: &str) -> CacheResult<Option<u64>> {
        let mut conn = self.client.clone();

        let ttl: i64 = conn
            .ttl(key)
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis TTL failed: {}", e)))?;

        // -2: no such key, -1: no expiry
        Ok(u64::try_from(ttl).ok())
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis GET failed: {}", e)))?;

        debug!(key, hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis SET failed: {}", e)))?;

        debug!(key, ttl_seconds, "Redis SET");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
