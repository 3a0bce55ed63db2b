//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into [`crate::domain::entities::NewsQuery`]
//! values and formats responses according to the API contract.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
