//! Request parameter set used for upstream queries and cache keys.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Date format used when a date parameter is stored or sent upstream.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An immutable, order-independent set of query parameters.
///
/// Keys are kept sorted, so two parameter sets built from the same pairs in a
/// different order compare equal and serialize identically. Dates are stored
/// in ISO-8601 calendar form (`YYYY-MM-DD`).
///
/// Credentials and paging options are not part of this set; they are added by
/// the upstream client and never influence cache keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    values: BTreeMap<String, String>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the set with `key` bound to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns a copy of the set with `key` bound to an ISO-8601 date.
    pub fn with_date(self, key: impl Into<String>, date: NaiveDate) -> Self {
        self.with(key, date.format(DATE_FORMAT).to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(key, value)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical serialization: a compact JSON object with sorted keys.
    pub fn canonical_json(&self) -> String {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        Value::Object(map).to_string()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = QueryParameters::new().with("q", "rust").with("from", "2026-01-01");
        let b = QueryParameters::new().with("from", "2026-01-01").with("q", "rust");

        assert_eq!(a, b);
        assert_eq!(a.canonical_json(), b.canonical_json());
    }

    #[test]
    fn test_canonical_json_is_sorted() {
        let params: QueryParameters = [("to", "2026-01-10"), ("q", "x"), ("from", "2026-01-01")]
            .into_iter()
            .collect();

        assert_eq!(
            params.canonical_json(),
            r#"{"from":"2026-01-01","q":"x","to":"2026-01-10"}"#
        );
    }

    #[test]
    fn test_with_date_uses_iso_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let params = QueryParameters::new().with_date("from", date);

        assert_eq!(params.get("from"), Some("2026-03-07"));
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let params = QueryParameters::new().with("q", "old").with("q", "new");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("q"), Some("new"));
    }
}
