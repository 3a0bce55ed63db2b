//! Helper functions shared by handlers and services.
//!
//! - [`cache_key`] - Deterministic cache key derivation
//! - [`news_normalizer`] - Upstream payload normalization
//! - [`date_param`] - ISO-8601 date parameter parsing

pub mod cache_key;
pub mod date_param;
pub mod news_normalizer;
