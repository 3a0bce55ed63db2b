//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: always, as long as the process is serving requests
///
/// The cache is optional, so an unreachable cache is reported as `degraded`
/// under `checks.cache` without failing the health check.
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "version": "0.1.0",
///   "checks": {
///     "cache": { "status": "ok", "backend": "redis" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            cache: check_cache(&state).await,
        },
    })
}

/// Checks cache connectivity.
async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if state.cache.health_check().await {
        CheckStatus {
            status: "ok",
            backend,
            message: None,
        }
    } else {
        CheckStatus {
            status: "degraded",
            backend,
            message: Some("Cache unreachable, serving from upstream".to_string()),
        }
    }
}
