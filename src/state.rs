//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::NewsService;
use crate::domain::NewsSource;
use crate::infrastructure::cache::CacheService;

/// Dependencies shared by all handlers.
///
/// Built once in [`crate::server::run`] (or by tests with stub sources) and
/// cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<NewsService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(source: Arc<dyn NewsSource>, cache: Arc<dyn CacheService>, ttl_seconds: u64) -> Self {
        let news_service = Arc::new(NewsService::new(source, cache.clone(), ttl_seconds));

        Self {
            news_service,
            cache,
        }
    }
}
