//! The three kinds of news query the gateway serves.

use crate::domain::entities::QueryParameters;
use crate::utils::cache_key::derive_key;
use crate::utils::date_param::{DateParamError, validate_date_range};
use chrono::NaiveDate;

pub const SEARCH_PREFIX: &str = "news:search";
pub const RANGE_PREFIX: &str = "news:range";
pub const LOCATION_PREFIX: &str = "news:location";

/// A validated news query.
///
/// Each variant has its own cache-key prefix, so a keyword search and a
/// location search for the same text never share an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsQuery {
    Search {
        q: String,
    },
    Range {
        q: String,
        from: NaiveDate,
        to: NaiveDate,
    },
    Location {
        location: String,
    },
}

impl NewsQuery {
    pub fn search(q: impl Into<String>) -> Self {
        Self::Search { q: q.into() }
    }

    /// Builds a date-bounded search.
    ///
    /// # Errors
    ///
    /// Returns [`DateParamError::InvertedRange`] if `from` is after `to`.
    pub fn range(q: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Result<Self, DateParamError> {
        validate_date_range(from, to)?;
        Ok(Self::Range {
            q: q.into(),
            from,
            to,
        })
    }

    pub fn location(location: impl Into<String>) -> Self {
        Self::Location {
            location: location.into(),
        }
    }

    /// Cache namespace for this kind of query.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Search { .. } => SEARCH_PREFIX,
            Self::Range { .. } => RANGE_PREFIX,
            Self::Location { .. } => LOCATION_PREFIX,
        }
    }

    /// Upstream parameters. A location is searched as free text.
    pub fn params(&self) -> QueryParameters {
        match self {
            Self::Search { q } => QueryParameters::new().with("q", q.as_str()),
            Self::Range { q, from, to } => QueryParameters::new()
                .with("q", q.as_str())
                .with_date("from", *from)
                .with_date("to", *to),
            Self::Location { location } => QueryParameters::new().with("q", location.as_str()),
        }
    }

    pub fn cache_key(&self) -> String {
        derive_key(self.prefix(), &self.params())
    }
}
