//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Upstream
//!
//! ```bash
//! export NEWS_API_KEY="..."                                  # required
//! export NEWS_API_URL="https://newsapi.org/v2/everything"    # optional
//! ```
//!
//! The API key is never committed or logged; `print_summary` masks it.
//!
//! ## Cache
//!
//! Either a full URL or individual components:
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//!
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without Redis the service caches in process memory.
//!
//! ## Optional Variables
//!
//! - `NEWS_PAGE_SIZE` - Articles per upstream request (default: 10, range: 1-100)
//! - `NEWS_LANGUAGE` - Two-letter language filter (default: unset)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Whole-request upstream timeout (default: 10)
//! - `CACHE_TTL_SECONDS` - Lifetime of cached results (default: 600)
//! - `CACHE_MAX_ENTRIES` - Entry limit of the in-memory cache (default: 10000)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RATE_LIMIT_PER_SECOND` - Per-IP sustained request rate (default: 5)
//! - `RATE_LIMIT_BURST` - Per-IP burst size (default: 50)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::application::services::DEFAULT_CACHE_TTL_SECONDS;
use crate::infrastructure::cache::DEFAULT_MAX_ENTRIES;
use crate::infrastructure::upstream::NewsApiSettings;
use crate::routes::RateLimit;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credential (`NEWS_API_KEY`). Must be non-empty.
    pub news_api_key: String,
    pub news_api_url: String,
    pub news_page_size: u32,
    pub news_language: Option<String>,
    /// Whole-request timeout for the upstream call, in seconds.
    pub upstream_timeout_seconds: u64,
    pub redis_url: Option<String>,
    /// TTL (seconds) for cached results, in Redis or in memory.
    pub cache_ttl_seconds: u64,
    /// Entry limit of the in-memory cache used when Redis is not configured.
    pub cache_max_entries: u64,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `NEWS_API_KEY` is missing.
    pub fn from_env() -> Result<Self> {
        let news_api_key = env::var("NEWS_API_KEY").context("NEWS_API_KEY must be set")?;

        let news_api_url =
            env::var("NEWS_API_URL").unwrap_or_else(|_| DEFAULT_NEWS_API_URL.to_string());

        let news_page_size = env::var("NEWS_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let news_language = env::var("NEWS_LANGUAGE")
            .ok()
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty());

        let upstream_timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let redis_url = Self::load_redis_url();

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS);

        let cache_max_entries = env::var("CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ENTRIES);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let (log_level, log_format) = log_settings_from_env();

        let rate_limit_per_second = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let rate_limit_burst = env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        Ok(Self {
            news_api_key,
            news_api_url,
            news_page_size,
            news_language,
            upstream_timeout_seconds,
            redis_url,
            cache_ttl_seconds,
            cache_max_entries,
            listen_addr,
            log_level,
            log_format,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    pub fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.news_api_key.trim().is_empty() {
            anyhow::bail!("NEWS_API_KEY must not be empty");
        }

        let url = Url::parse(&self.news_api_url)
            .with_context(|| format!("NEWS_API_URL is not a valid URL: '{}'", self.news_api_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "NEWS_API_URL must use http or https, got '{}'",
                self.news_api_url
            );
        }

        if !(1..=100).contains(&self.news_page_size) {
            anyhow::bail!(
                "NEWS_PAGE_SIZE must be between 1 and 100, got {}",
                self.news_page_size
            );
        }

        if let Some(ref lang) = self.news_language
            && (lang.len() != 2 || !lang.chars().all(|c| c.is_ascii_lowercase()))
        {
            anyhow::bail!("NEWS_LANGUAGE must be a two-letter code, got '{}'", lang);
        }

        if self.upstream_timeout_seconds == 0 || self.upstream_timeout_seconds > 120 {
            anyhow::bail!(
                "UPSTREAM_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.upstream_timeout_seconds
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.cache_max_entries == 0 {
            anyhow::bail!("CACHE_MAX_ENTRIES must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.rate_limit_per_second == 0 {
            anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than 0");
        }
        if self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_BURST must be greater than 0");
        }

        Ok(())
    }

    /// Upstream client settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `NEWS_API_URL` does not parse.
    pub fn news_api_settings(&self) -> Result<NewsApiSettings> {
        Ok(NewsApiSettings {
            base_url: Url::parse(&self.news_api_url).context("Invalid NEWS_API_URL")?,
            api_key: self.news_api_key.clone(),
            page_size: self.news_page_size,
            language: self.news_language.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_seconds),
        })
    }

    pub fn rate_limit(&self) -> RateLimit {
        RateLimit {
            per_second: self.rate_limit_per_second,
            burst: self.rate_limit_burst,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.news_api_url);
        tracing::info!("  API key: {}", mask_secret(&self.news_api_key));
        tracing::info!(
            "  Page size: {}, language: {}",
            self.news_page_size,
            self.news_language.as_deref().unwrap_or("any")
        );
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_seconds);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {} (enabled)", mask_connection_string(redis_url));
        } else {
            tracing::info!(
                "  Redis: disabled (in-memory cache, max {} entries)",
                self.cache_max_entries
            );
        }

        tracing::info!("  Cache TTL: {}s", self.cache_ttl_seconds);
        tracing::info!(
            "  Rate limit: {}/s, burst {}",
            self.rate_limit_per_second,
            self.rate_limit_burst
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Log level (`RUST_LOG`, default `info`) and format (`LOG_FORMAT`, default `text`).
///
/// Read separately from [`Config::from_env`] so logging can be set up before the
/// rest of the configuration is loaded and validated.
pub fn log_settings_from_env() -> (String, String) {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    (log_level, log_format)
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
pub fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Shows only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
