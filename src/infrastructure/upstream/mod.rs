//! Outbound clients for the upstream news API.

mod news_api_client;

pub use news_api_client::{NewsApiClient, NewsApiSettings};
