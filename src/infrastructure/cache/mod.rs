//! Cache backends for normalized news results.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process TTL cache when Redis is not configured
//! - [`NullCache`] - No-op fallback when Redis is configured but unreachable

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::{DEFAULT_MAX_ENTRIES, MemoryCache};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
