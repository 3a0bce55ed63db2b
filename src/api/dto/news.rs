//! DTOs for the news query endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{NormalizedResult, ResultSource, SourcedResult};

/// Query string for `GET /news/search`.
///
/// Fields are optional at the serde level so that a missing parameter is
/// reported through [`Validate`] with a JSON error body instead of a plain-text
/// extractor rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(
        required(message = "q is required"),
        length(min = 1, max = 500),
        custom(function = "not_blank")
    )]
    pub q: Option<String>,
}

/// Query string for `GET /news/range`. Dates are parsed by the handler.
#[derive(Debug, Deserialize, Validate)]
pub struct RangeParams {
    #[validate(
        required(message = "q is required"),
        length(min = 1, max = 500),
        custom(function = "not_blank")
    )]
    pub q: Option<String>,

    #[validate(required(message = "from_date is required"))]
    pub from_date: Option<String>,

    #[validate(required(message = "to_date is required"))]
    pub to_date: Option<String>,
}

/// Query string for `GET /news/location`.
#[derive(Debug, Deserialize, Validate)]
pub struct LocationParams {
    #[validate(
        required(message = "location is required"),
        length(min = 1, max = 500),
        custom(function = "not_blank")
    )]
    pub location: Option<String>,
}

/// Response envelope for all news endpoints.
///
/// ```json
/// { "source": "api", "data": { "total": 1, "articles": [ ... ] } }
/// ```
#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub source: ResultSource,
    pub data: NormalizedResult,
}

impl From<SourcedResult> for NewsResponse {
    fn from(result: SourcedResult) -> Self {
        Self {
            source: result.source,
            data: result.data,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
