//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a per-IP rate limiter for the news endpoints.
///
/// The limiter sits in front of the cache, so hits count too.
///
/// # Limits
///
/// - **Rate**: `per_second` requests per second, replenished evenly
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the socket
/// peer address, so the router must be served with connect info.
///
/// # Panics
///
/// Panics if `burst` is zero. [`crate::config::Config::validate`] rejects that
/// at startup.
pub fn layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let replenish_ms = (1_000 / per_second.max(1)).max(1);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(burst)
            .finish()
            .expect("rate limit burst must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
