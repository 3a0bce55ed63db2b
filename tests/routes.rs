mod common;

use axum::ServiceExt;
use axum::extract::Request;
use common::StubNewsSource;
use metrics_exporter_prometheus::PrometheusBuilder;
use news_gateway::metrics::Metrics;
use news_gateway::routes::{RateLimit, app_router};
use reqwest::StatusCode;
use std::net::SocketAddr;
use std::sync::Arc;

const STRICT: RateLimit = RateLimit {
    per_second: 1,
    burst: 1,
};

/// Serves the fully assembled router on a local port, the way `server::run` does.
async fn spawn_app(source: Arc<StubNewsSource>, limits: RateLimit) -> String {
    let state = common::create_test_state(source, common::memory_cache());
    let metrics = Metrics::from_handle(PrometheusBuilder::new().build_recorder().handle());
    let app = app_router(state, limits, Some(&metrics));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
        )
        .await
        .unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_news_routes_are_nested_and_trailing_slash_is_trimmed() {
    let source = Arc::new(StubNewsSource::ok(common::sample_payload()));
    let base = spawn_app(source.clone(), RateLimit { per_second: 100, burst: 100 }).await;

    let response = reqwest::get(format!("{base}/news/search/?q=x")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["source"], "api");
    assert_eq!(source.calls(), 1);

    let response = reqwest::get(format!("{base}/news/location?location=Berlin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = reqwest::get(format!("{base}/search?q=x")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limit_rejects_burst_but_not_health() {
    let source = Arc::new(StubNewsSource::ok(common::sample_payload()));
    let base = spawn_app(source.clone(), STRICT).await;

    let first = reqwest::get(format!("{base}/news/search/?q=x")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = reqwest::get(format!("{base}/news/search?q=x")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    // The limit is per client, shared by all news routes
    let other = reqwest::get(format!("{base}/news/location?location=Berlin"))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(source.calls(), 1);

    for _ in 0..3 {
        let health = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
    }

    let metrics = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(metrics.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_validation_errors_pass_through_full_stack() {
    let source = Arc::new(StubNewsSource::ok(common::sample_payload()));
    let base = spawn_app(source.clone(), RateLimit { per_second: 100, burst: 100 }).await;

    let response = reqwest::get(format!(
        "{base}/news/range?q=x&from_date=2024-02-01&to_date=2024-01-01"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(source.calls(), 0);
}
