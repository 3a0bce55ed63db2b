//! Read-through cached news lookups.

use std::future::Future;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::domain::entities::{
    NewsQuery, NormalizedResult, QueryParameters, ResultSource, SourcedResult,
};
use crate::domain::news_source::{NewsSource, UpstreamError};
use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
use crate::metrics::{CACHE_HITS, CACHE_MISSES, UPSTREAM_ERRORS};
use crate::utils::cache_key::derive_key;
use crate::utils::news_normalizer::normalize_news;

/// Default lifetime of a cached result, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;

/// Serves news queries through a read-through cache.
///
/// The cache is purely an optimization: when it is down or holds garbage the
/// service still answers, it just goes to the upstream every time. Upstream
/// failures, on the other hand, always reach the caller.
///
/// Concurrent misses for the same key are not deduplicated. Both requests
/// fetch and both write; the last write wins.
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    cache: Arc<dyn CacheService>,
    ttl_seconds: u64,
}

impl NewsService {
    /// Creates a new news service.
    pub fn new(source: Arc<dyn NewsSource>, cache: Arc<dyn CacheService>, ttl_seconds: u64) -> Self {
        Self {
            source,
            cache,
            ttl_seconds,
        }
    }

    /// Answers `query` from cache, or from the upstream on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the entry was not cached and the upstream call failed.
    /// Nothing is written to the cache in that case.
    pub async fn query(&self, query: &NewsQuery) -> Result<SourcedResult, UpstreamError> {
        let params = query.params();
        self.cached_call(query.prefix(), &params, || self.fetch_normalized(&params))
            .await
    }

    /// Generic read-through wrapper.
    ///
    /// # Flow
    ///
    /// 1. Derive the key from `prefix` and `params`
    /// 2. Cache hit: return the stored result tagged [`ResultSource::Cache`]
    /// 3. Cache miss or cache error: run `fetch_and_normalize`
    /// 4. On success store the result with the configured TTL and tag it [`ResultSource::Api`]
    ///
    /// # Errors
    ///
    /// Propagates the error from `fetch_and_normalize` unchanged.
    pub async fn cached_call<F, Fut>(
        &self,
        prefix: &str,
        params: &QueryParameters,
        fetch_and_normalize: F,
    ) -> Result<SourcedResult, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<NormalizedResult, UpstreamError>>,
    {
        let key = derive_key(prefix, params);

        // Cache failures are absorbed here and nowhere else: a broken read
        // degrades to a miss.
        match self.try_read(&key).await {
            Ok(Some(data)) => {
                debug!(%key, "Cache HIT");
                counter!(CACHE_HITS).increment(1);
                return Ok(SourcedResult {
                    source: ResultSource::Cache,
                    data,
                });
            }
            Ok(None) => debug!(%key, "Cache MISS"),
            Err(e) => warn!(%key, error = %e, "Cache read failed, treating as miss"),
        }
        counter!(CACHE_MISSES).increment(1);

        let data = fetch_and_normalize().await.inspect_err(|e| {
            counter!(UPSTREAM_ERRORS).increment(1);
            debug!(%key, error = %e, "Upstream fetch failed, nothing cached");
        })?;

        // Best-effort write.
        if let Err(e) = self.try_write(&key, &data).await {
            warn!(%key, error = %e, "Cache write failed");
        }

        Ok(SourcedResult {
            source: ResultSource::Api,
            data,
        })
    }

    async fn fetch_normalized(
        &self,
        params: &QueryParameters,
    ) -> Result<NormalizedResult, UpstreamError> {
        let raw = self.source.fetch(params).await?;
        Ok(normalize_news(&raw))
    }

    async fn try_read(&self, key: &str) -> CacheResult<Option<NormalizedResult>> {
        let Some(raw) = self.cache.get(key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CacheError::OperationError(format!("corrupt cache entry: {}", e)))
    }

    async fn try_write(&self, key: &str, data: &NormalizedResult) -> CacheResult<()> {
        let raw = serde_json::to_string(data)
            .map_err(|e| CacheError::OperationError(format!("serialize failed: {}", e)))?;

        self.cache.set(key, &raw, self.ttl_seconds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockNewsSource;
    use crate::domain::entities::NormalizedArticle;
    use crate::infrastructure::cache::{MemoryCache, MockCacheService};
    use serde_json::{Value, json};

    fn fixture() -> Value {
        json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"name": "Example"},
                "title": "Test title",
                "description": "Test description",
                "url": "https://example.com",
                "publishedAt": "2026-01-01"
            }]
        })
    }

    fn expected() -> NormalizedResult {
        NormalizedResult {
            total: 1,
            articles: vec![NormalizedArticle {
                source: Some("Example".to_string()),
                title: Some("Test title".to_string()),
                description: Some("Test description".to_string()),
                url: Some("https://example.com".to_string()),
                published: Some("2026-01-01".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn test_miss_fetches_and_stores() {
        let mut source = MockNewsSource::new();
        source
            .expect_fetch()
            .withf(|params| params.get("q") == Some("Modi"))
            .times(1)
            .returning(|_| Ok(fixture()));

        let query = NewsQuery::search("Modi");
        let key = query.cache_key();

        let mut cache = MockCacheService::new();
        cache.expect_get().times(1).returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(move |k, v, ttl| {
                k == key
                    && *ttl == DEFAULT_CACHE_TTL_SECONDS
                    && serde_json::from_str::<NormalizedResult>(v).is_ok()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = NewsService::new(
            Arc::new(source),
            Arc::new(cache),
            DEFAULT_CACHE_TTL_SECONDS,
        );

        let result = service.query(&query).await.unwrap();

        assert_eq!(result.source, ResultSource::Api);
        assert_eq!(result.data, expected());
    }

    #[tokio::test]
    async fn test_hit_skips_upstream() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().times(0);

        let stored = serde_json::to_string(&expected()).unwrap();
        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        cache.expect_set().times(0);

        let service = NewsService::new(Arc::new(source), Arc::new(cache), 600);

        let result = service.query(&NewsQuery::search("Modi")).await.unwrap();

        assert_eq!(result.source, ResultSource::Cache);
        assert_eq!(result.data, expected());
    }

    #[tokio::test]
    async fn test_cache_read_error_is_a_miss() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().times(1).returning(|_| Ok(fixture()));

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("connection refused".to_string())));
        cache.expect_set().times(1).returning(|_, _, _| Ok(()));

        let service = NewsService::new(Arc::new(source), Arc::new(cache), 600);

        let result = service.query(&NewsQuery::search("Modi")).await.unwrap();

        assert_eq!(result.source, ResultSource::Api);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().times(1).returning(|_| Ok(fixture()));

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Ok(Some("{not json".to_string())));
        cache.expect_set().times(1).returning(|_, _, _| Ok(()));

        let service = NewsService::new(Arc::new(source), Arc::new(cache), 600);

        let result = service.query(&NewsQuery::search("Modi")).await.unwrap();

        assert_eq!(result.source, ResultSource::Api);
        assert_eq!(result.data, expected());
    }

    #[tokio::test]
    async fn test_cache_write_error_is_swallowed() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().times(1).returning(|_| Ok(fixture()));

        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| Ok(None));
        cache
            .expect_set()
            .times(1)
            .returning(|_, _, _| Err(CacheError::OperationError("READONLY".to_string())));

        let service = NewsService::new(Arc::new(source), Arc::new(cache), 600);

        let result = service.query(&NewsQuery::search("Modi")).await.unwrap();

        assert_eq!(result.source, ResultSource::Api);
        assert_eq!(result.data, expected());
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_and_skips_write() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().times(1).returning(|_| {
            Err(UpstreamError::Api {
                code: Some("apiKeyInvalid".to_string()),
                message: Some("Your API key is invalid".to_string()),
            })
        });

        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().times(0);

        let service = NewsService::new(Arc::new(source), Arc::new(cache), 600);

        let err = service.query(&NewsQuery::search("Modi")).await.unwrap_err();

        assert_eq!(err.client_message(), "Your API key is invalid");
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let mut source = MockNewsSource::new();
        source.expect_fetch().times(1).returning(|_| Ok(fixture()));

        let cache = Arc::new(MemoryCache::new());
        let service = NewsService::new(Arc::new(source), cache.clone(), 600);
        let query = NewsQuery::location("Delhi");

        let first = service.query(&query).await.unwrap();
        let second = service.query(&query).await.unwrap();

        assert_eq!(first.source, ResultSource::Api);
        assert_eq!(second.source, ResultSource::Cache);
        assert_eq!(first.data, second.data);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cached_call_with_custom_fetch() {
        let source = MockNewsSource::new();
        let cache = Arc::new(MemoryCache::new());
        let service = NewsService::new(Arc::new(source), cache.clone(), 600);
        let params = QueryParameters::new().with("q", "custom");

        let result = service
            .cached_call("custom", &params, || async { Ok(NormalizedResult::empty()) })
            .await
            .unwrap();

        assert_eq!(result.source, ResultSource::Api);
        let stored = cache.get(&derive_key("custom", &params)).await.unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"total":0,"articles":[]}"#));
    }

    #[tokio::test]
    async fn test_counters_track_hits_and_misses() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let mut source = MockNewsSource::new();
        source.expect_fetch().times(1).returning(|_| Ok(fixture()));

        let service = NewsService::new(Arc::new(source), Arc::new(MemoryCache::new()), 600);
        let query = NewsQuery::search("Modi");

        service.query(&query).await.unwrap();
        service.query(&query).await.unwrap();

        let rendered = handle.render();
        assert!(rendered.contains("news_cache_misses_total 1"), "{rendered}");
        assert!(rendered.contains("news_cache_hits_total 1"), "{rendered}");
    }
}
