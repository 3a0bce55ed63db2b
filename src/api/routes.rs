//! News API route configuration.

use crate::api::handlers::{location_handler, range_handler, search_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// News query routes, nested under `/news` by the top-level router.
///
/// # Endpoints
///
/// - `GET /search`   - Keyword search
/// - `GET /range`    - Keyword search within a date range
/// - `GET /location` - News about a location
pub fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_handler))
        .route("/range", get(range_handler))
        .route("/location", get(location_handler))
}
