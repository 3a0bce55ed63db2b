//! Application layer services implementing the gateway's logic.
//!
//! Services consume the [`crate::domain::NewsSource`] and
//! [`crate::infrastructure::cache::CacheService`] traits, so handlers never talk
//! to `reqwest` or Redis directly.
//!
//! # Available Services
//!
//! - [`services::news_service::NewsService`] - Read-through cached news queries

pub mod services;
