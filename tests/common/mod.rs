#![allow(dead_code)]

use async_trait::async_trait;
use news_gateway::domain::entities::QueryParameters;
use news_gateway::domain::{NewsSource, UpstreamError};
use news_gateway::infrastructure::cache::{CacheError, CacheResult, CacheService, MemoryCache};
use news_gateway::state::AppState;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_TTL_SECONDS: u64 = 600;

/// Upstream payload with one complete article.
pub fn sample_payload() -> Value {
    json!({
        "status": "ok",
        "totalResults": 1,
        "articles": [{
            "source": { "id": null, "name": "Example" },
            "title": "Test title",
            "description": "Test description",
            "url": "https://example.com",
            "publishedAt": "2026-01-01"
        }]
    })
}

/// Upstream stand-in that records every call.
pub struct StubNewsSource {
    response: Result<Value, UpstreamError>,
    calls: AtomicUsize,
    last_params: Mutex<Option<QueryParameters>>,
}

impl StubNewsSource {
    pub fn ok(payload: Value) -> Self {
        Self::with_response(Ok(payload))
    }

    pub fn failing(error: UpstreamError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<Value, UpstreamError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<QueryParameters> {
        self.last_params.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for StubNewsSource {
    async fn fetch(&self, params: &QueryParameters) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());
        self.response.clone()
    }
}

/// Cache whose every operation fails, like an unreachable Redis.
pub struct BrokenCache;

#[async_trait]
impl CacheService for BrokenCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

pub fn create_test_state(
    source: Arc<StubNewsSource>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    AppState::new(source, cache, TEST_TTL_SECONDS)
}

pub fn memory_cache() -> Arc<MemoryCache> {
    Arc::new(MemoryCache::new())
}
