//! Prometheus metrics recorder and the `/metrics` route.

use axum::{Router, routing::get};
use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const CACHE_HITS: &str = "news_cache_hits_total";
pub const CACHE_MISSES: &str = "news_cache_misses_total";
pub const UPSTREAM_ERRORS: &str = "news_upstream_errors_total";

/// Handle to the process-wide Prometheus recorder.
#[derive(Clone)]
pub struct Metrics {
    handle: PrometheusHandle,
}

impl Metrics {
    /// Installs the Prometheus recorder as the global `metrics` recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if a global recorder is already installed.
    pub fn install() -> Result<Self, BuildError> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        describe_counter!(CACHE_HITS, "News queries answered from the cache");
        describe_counter!(CACHE_MISSES, "News queries that went to the upstream API");
        describe_counter!(UPSTREAM_ERRORS, "Failed upstream news API calls");

        Ok(Self { handle })
    }

    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Current metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Router exposing `GET /metrics`.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
