//! Core domain entities for the news gateway.
//!
//! Entities are plain data structures. They carry no I/O and no knowledge of
//! the upstream API or the cache backend.
//!
//! # Entity Types
//!
//! - [`QueryParameters`] - Canonical, order-independent request parameters
//! - [`NewsQuery`] - A validated search, date-range, or location query
//! - [`NormalizedArticle`] - One article in the stable output shape
//! - [`NormalizedResult`] - A page of normalized articles with a total count
//! - [`SourcedResult`] - A result tagged with its [`ResultSource`]

pub mod article;
pub mod news_query;
pub mod query;

pub use article::{NormalizedArticle, NormalizedResult, ResultSource, SourcedResult};
pub use news_query::{LOCATION_PREFIX, NewsQuery, RANGE_PREFIX, SEARCH_PREFIX};
pub use query::{DATE_FORMAT, QueryParameters};
