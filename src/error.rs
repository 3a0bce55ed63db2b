//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, AppError>`. Errors render as
//!
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::news_source::UpstreamError;
use crate::utils::date_param::DateParamError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Request failure classes.
///
/// - [`AppError::Validation`]: client input problem, `400`, raised before any network call
/// - [`AppError::BadGateway`]: the upstream news API failed, `502`
///
/// Cache failures never become an `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    BadGateway { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn bad_gateway(message: impl Into<String>, details: Value) -> Self {
        Self::BadGateway {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::BadGateway { message, details } => ("bad_gateway", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|name| name.to_string())
            .collect();
        fields.sort();

        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));

        Self::bad_request(
            format!("Missing or invalid query parameter: {}", fields.join(", ")),
            details,
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(
            "Malformed query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<DateParamError> for AppError {
    fn from(err: DateParamError) -> Self {
        let details = match &err {
            DateParamError::InvalidFormat { name, value } => {
                json!({ "parameter": name, "value": value })
            }
            DateParamError::InvertedRange { from, to } => {
                json!({ "from_date": from.to_string(), "to_date": to.to_string() })
            }
        };

        Self::bad_request(err.to_string(), details)
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        let details = match &err {
            UpstreamError::Status { status, .. } => json!({ "upstream_status": status }),
            UpstreamError::Api {
                code: Some(code), ..
            } => json!({ "upstream_code": code }),
            _ => json!({}),
        };

        Self::bad_gateway(err.client_message(), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::bad_gateway("x", json!({})).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_upstream_error_keeps_message_and_code() {
        let err: AppError = UpstreamError::Api {
            code: Some("apiKeyInvalid".to_string()),
            message: Some("Your API key is invalid".to_string()),
        }
        .into();

        let info = err.to_error_info();
        assert_eq!(info.code, "bad_gateway");
        assert_eq!(info.message, "Your API key is invalid");
        assert_eq!(info.details["upstream_code"], "apiKeyInvalid");
    }

    #[test]
    fn test_inverted_range_is_validation_error() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let err: AppError = DateParamError::InvertedRange { from, to }.into();

        assert!(matches!(err, AppError::Validation { .. }));
        let info = err.to_error_info();
        assert_eq!(info.details["from_date"], "2026-01-10");
        assert_eq!(info.details["to_date"], "2026-01-01");
    }
}
