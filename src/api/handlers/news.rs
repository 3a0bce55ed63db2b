//! Handlers for the news query endpoints.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::news::{LocationParams, NewsResponse, RangeParams, SearchParams};
use crate::domain::entities::NewsQuery;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::date_param::parse_iso_date;

/// Keyword search.
///
/// # Endpoint
///
/// `GET /news/search?q=<text>`
///
/// # Response
///
/// ```json
/// {
///   "source": "api",
///   "data": {
///     "total": 1,
///     "articles": [
///       {
///         "source": "Example",
///         "title": "Test title",
///         "description": "Test description",
///         "url": "https://example.com",
///         "published": "2026-01-01"
///       }
///     ]
///   }
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if `q` is missing or blank
/// - 502 Bad Gateway if the upstream API fails
pub async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<NewsResponse>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let query = NewsQuery::search(trimmed(params.q));
    run_query(&state, query).await
}

/// Keyword search restricted to a publication date range.
///
/// # Endpoint
///
/// `GET /news/range?q=<text>&from_date=YYYY-MM-DD&to_date=YYYY-MM-DD`
///
/// Both bounds are inclusive. Equal dates select a single day.
///
/// # Errors
///
/// - 400 Bad Request if a parameter is missing, a date is malformed, or
///   `from_date` is after `to_date`; no upstream call is made
/// - 502 Bad Gateway if the upstream API fails
pub async fn range_handler(
    State(state): State<AppState>,
    query: Result<Query<RangeParams>, QueryRejection>,
) -> Result<Json<NewsResponse>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let from = parse_iso_date("from_date", params.from_date.as_deref().unwrap_or_default())?;
    let to = parse_iso_date("to_date", params.to_date.as_deref().unwrap_or_default())?;

    let query = NewsQuery::range(trimmed(params.q), from, to)?;
    run_query(&state, query).await
}

/// News mentioning a place.
///
/// # Endpoint
///
/// `GET /news/location?location=<place>`
///
/// # Errors
///
/// - 400 Bad Request if `location` is missing or blank
/// - 502 Bad Gateway if the upstream API fails
pub async fn location_handler(
    State(state): State<AppState>,
    query: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Json<NewsResponse>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let query = NewsQuery::location(trimmed(params.location));
    run_query(&state, query).await
}

async fn run_query(state: &AppState, query: NewsQuery) -> Result<Json<NewsResponse>, AppError> {
    let result = state.news_service.query(&query).await?;

    debug!(
        kind = query.prefix(),
        source = result.source.as_str(),
        articles = result.data.articles.len(),
        "News query served"
    );

    Ok(Json(result.into()))
}

/// Validated parameters are always present; trims surrounding whitespace.
fn trimmed(value: Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}
