//! `reqwest`-backed client for NewsAPI-compatible search endpoints.

use crate::domain::entities::QueryParameters;
use crate::domain::news_source::{NewsSource, UpstreamError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Connection settings for [`NewsApiClient`].
#[derive(Debug, Clone)]
pub struct NewsApiSettings {
    pub base_url: Url,
    pub api_key: String,
    pub page_size: u32,
    pub language: Option<String>,
    pub timeout: Duration,
}

/// Client for the upstream news search API.
///
/// One call to [`NewsSource::fetch`] sends exactly one GET request. The API key
/// travels in the `X-Api-Key` header, so it never shows up in logged URLs.
/// Paging and language options are appended here and are not part of the
/// caller's [`QueryParameters`].
pub struct NewsApiClient {
    http: reqwest::Client,
    settings: NewsApiSettings,
}

impl NewsApiClient {
    /// Builds the client with the configured timeout applied to the whole request.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(settings: NewsApiSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("news-gateway/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(settings.timeout.min(Duration::from_secs(4)))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { http, settings })
    }

    /// Full outbound query string pairs for `params`.
    fn outbound_query(&self, params: &QueryParameters) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        query.push(("pageSize".to_string(), self.settings.page_size.to_string()));

        if let Some(language) = &self.settings.language {
            query.push(("language".to_string(), language.clone()));
        }

        query
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(&self, params: &QueryParameters) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(self.settings.base_url.clone())
            .header("X-Api-Key", &self.settings.api_key)
            .query(&self.outbound_query(params))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Upstream response");

        let result = interpret_response(status, &body);
        if let Err(e) = &result {
            warn!(error = %e, "Upstream request failed");
        }
        result
    }
}

fn map_transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(e.to_string())
    }
}

/// Turns an HTTP status and raw body into the parsed payload or an error.
///
/// A success requires a 2xx status, a JSON body, and `"status": "ok"` in it.
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value, UpstreamError> {
    let parsed = serde_json::from_slice::<Value>(body);

    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            message: parsed.ok().as_ref().and_then(|v| string_field(v, "message")),
        });
    }

    let payload = parsed.map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;

    if payload.get("status").and_then(Value::as_str) != Some("ok") {
        return Err(UpstreamError::Api {
            code: string_field(&payload, "code"),
            message: string_field(&payload, "message"),
        });
    }

    Ok(payload)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}
