//! HTTP server initialization and runtime setup.
//!
//! Handles cache selection, upstream client construction, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::metrics::Metrics;
use crate::infrastructure::upstream::NewsApiClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Prometheus metrics recorder
/// - Cache backend (Redis, or NullCache if Redis is unreachable, or an
///   in-memory cache when Redis is not configured)
/// - Upstream news API client
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - A metrics recorder is already installed
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let metrics = Metrics::install().context("Failed to install metrics recorder")?;

    let cache = build_cache(&config).await;

    let settings = config.news_api_settings()?;
    let client = NewsApiClient::new(settings).context("Failed to build upstream HTTP client")?;
    tracing::info!("Upstream client ready ({})", config.news_api_url);

    let state = AppState::new(Arc::new(client), cache, config.cache_ttl_seconds);

    let app = app_router(state, config.rate_limit(), Some(&metrics));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    match &config.redis_url {
        Some(redis_url) => match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        },
        None => {
            tracing::info!(
                "Redis not configured, caching up to {} entries in memory",
                config.cache_max_entries
            );
            Arc::new(MemoryCache::with_capacity(config.cache_max_entries))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
