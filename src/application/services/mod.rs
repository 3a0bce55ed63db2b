//! Business logic services for the application layer.

pub mod news_service;

pub use news_service::{DEFAULT_CACHE_TTL_SECONDS, NewsService};
