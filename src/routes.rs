//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check (not rate limited)
//! - `GET  /news/search`     - Keyword search
//! - `GET  /news/range`      - Keyword search within a date range
//! - `GET  /news/location`   - News about a location
//! - `GET  /metrics`         - Prometheus metrics, when a recorder is installed
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/news/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::metrics::Metrics;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Rate limit settings for the news routes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

/// Constructs the application router with all routes and middleware.
///
/// The returned service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the rate limiter
/// can see peer addresses.
pub fn app_router(
    state: AppState,
    limits: RateLimit,
    metrics: Option<&Metrics>,
) -> NormalizePath<Router> {
    let news_router = api::routes::news_routes()
        .layer(rate_limit::layer(limits.per_second, limits.burst));

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .nest("/news", news_router)
        .with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(metrics.router());
    }

    let router = router.layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
