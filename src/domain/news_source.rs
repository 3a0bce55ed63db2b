//! Upstream news source contract.

use crate::domain::entities::QueryParameters;
use async_trait::async_trait;
use serde_json::Value;

/// Generic message forwarded to clients when the upstream gave none.
pub const GENERIC_UPSTREAM_MESSAGE: &str = "Upstream News API request failed";

/// Failures of the upstream news API.
///
/// Every variant maps to `502 Bad Gateway` at the HTTP boundary. None of them
/// is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The request could not be sent or the connection broke.
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// No complete response within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Non-success HTTP status. `message` is the upstream's own text when it sent one.
    #[error("upstream returned HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// HTTP succeeded but the payload `status` field reported failure.
    #[error("upstream reported an error: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        code: Option<String>,
        message: Option<String>,
    },

    /// The body was not valid JSON.
    #[error("upstream returned an unreadable body: {0}")]
    InvalidBody(String),
}

impl UpstreamError {
    /// Message safe to show to API clients.
    ///
    /// Forwards the upstream's own message when present and falls back to a
    /// generic text otherwise. Transport details are never exposed.
    pub fn client_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(m), ..
            }
            | Self::Api {
                message: Some(m), ..
            } => m.clone(),
            Self::Api { message: None, .. } => "News API error".to_string(),
            _ => GENERIC_UPSTREAM_MESSAGE.to_string(),
        }
    }
}

/// Something that can run a news query against the upstream API.
///
/// Implementations return the raw parsed JSON body unchanged on success.
/// Normalization is the caller's job.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::NewsApiClient`] - `reqwest`-backed NewsAPI client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Issues exactly one outbound request for `params`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, timeout, non-success
    /// status, or a payload-level failure status.
    async fn fetch(&self, params: &QueryParameters) -> Result<Value, UpstreamError>;
}
