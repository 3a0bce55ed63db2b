//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// **On Request:** creates an `INFO` span with method, URI, and HTTP version.
/// The upstream API key never appears here because it travels in a header of
/// the outbound request, not in the inbound URI.
///
/// **On Response:** logs status and latency in milliseconds at `INFO`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/news/search?q=rust version=HTTP/1.1}: finished processing request latency=212 ms status=200
/// ```
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
