//! # News Gateway
//!
//! A caching JSON gateway in front of a third-party news search API, built with Axum and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Query and article entities, the upstream source trait
//! - **Application Layer** ([`application`]) - Read-through cached news queries
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis/in-memory caches and the upstream HTTP client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request flow
//!
//! Query parameters are validated, turned into a canonical parameter set and hashed
//! into a cache key. A cached result is returned as-is; otherwise the upstream API is
//! called, its payload normalized, stored with a TTL, and returned.
//!
//! Every response is wrapped as `{"source": "cache" | "api", "data": {...}}`.
//!
//! ## Quick Start
//!
//! ```bash
//! export NEWS_API_KEY="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! curl 'http://localhost:3000/news/search?q=rust'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod metrics;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::NewsService;
    pub use crate::domain::entities::{NewsQuery, NormalizedArticle, NormalizedResult, ResultSource};
    pub use crate::domain::{NewsSource, UpstreamError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, MemoryCache};
    pub use crate::state::AppState;
}
