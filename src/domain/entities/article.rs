//! Normalized article and result entities.

use serde::{Deserialize, Serialize};

/// A single news article in the gateway's stable output shape.
///
/// Every field is optional because the upstream may omit any of them.
/// Absent values serialize as `null` rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    pub source: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published: Option<String>,
}

/// A normalized search result, as returned to clients and stored in the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub total: u64,
    pub articles: Vec<NormalizedArticle>,
}

impl NormalizedResult {
    /// An empty result: no articles, zero total.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Where a response's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Cache,
    Api,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Api => "api",
        }
    }
}

/// A normalized result together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedResult {
    pub source: ResultSource,
    pub data: NormalizedResult,
}
