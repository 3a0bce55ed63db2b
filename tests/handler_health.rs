mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{BrokenCache, StubNewsSource};
use news_gateway::api::handlers::health_handler;
use news_gateway::infrastructure::cache::{CacheService, NullCache};
use std::sync::Arc;

fn make_server(cache: Arc<dyn CacheService>) -> TestServer {
    let source = Arc::new(StubNewsSource::ok(common::sample_payload()));
    let state = common::create_test_state(source, cache);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = make_server(common::memory_cache());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["backend"], "memory");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = make_server(Arc::new(NullCache::new()));

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("cache").is_some());
    assert_eq!(json["checks"]["cache"]["backend"], "none");
}

#[tokio::test]
async fn test_health_reports_degraded_cache_without_failing() {
    let server = make_server(Arc::new(BrokenCache));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "degraded");
    assert!(json["checks"]["cache"]["message"].is_string());
}
