//! Domain layer containing the news data model and the upstream contract.
//!
//! This module has no dependencies on HTTP, Redis, or `reqwest`.
//!
//! # Architecture
//!
//! - [`entities`] - Query parameters and normalized result types
//! - [`news_source`] - [`news_source::NewsSource`] trait implemented by upstream clients
//!
//! # Request Flow
//!
//! 1. A handler validates input and builds [`entities::QueryParameters`]
//! 2. [`crate::application::services::NewsService`] derives a cache key and consults the cache
//! 3. On a miss, a [`news_source::NewsSource`] is called and its payload normalized
//! 4. The result is stored and returned, tagged with its [`entities::ResultSource`]

pub mod entities;
pub mod news_source;

pub use news_source::{NewsSource, UpstreamError};

#[cfg(test)]
pub use news_source::MockNewsSource;
