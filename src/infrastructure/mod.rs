//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and the
//! cache contract used by the application layer.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends (Redis, in-memory, no-op)
//! - [`upstream`] - HTTP client for the news search API

pub mod cache;
pub mod upstream;
