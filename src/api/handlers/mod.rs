//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod news;

pub use health::health_handler;
pub use news::{location_handler, range_handler, search_handler};
