//! Normalization of raw upstream payloads.
//!
//! Converts whatever JSON the news API returned into a [`NormalizedResult`].
//! The conversion is total: malformed input degrades to empty or `null`
//! fields and never produces an error.

use crate::domain::entities::{NormalizedArticle, NormalizedResult};
use serde_json::{Map, Value};

/// Normalizes a raw upstream payload.
///
/// # Mapping Rules
///
/// - Non-object payloads yield `{ total: 0, articles: [] }`
/// - `articles` missing or not an array yields no articles
/// - Array entries that are not objects are **skipped**
/// - Per article: `source.name`, `title`, `description`, `url`, and
///   `publishedAt` (renamed to `published`); anything absent or not a string
///   becomes `None`
/// - `total` is `totalResults` when it is a non-negative integer (or a string
///   holding one), otherwise the number of extracted articles
/// - Article order is preserved
pub fn normalize_news(raw: &Value) -> NormalizedResult {
    let Some(payload) = raw.as_object() else {
        return NormalizedResult::empty();
    };

    let articles: Vec<NormalizedArticle> = payload
        .get("articles")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_article).collect())
        .unwrap_or_default();

    let total = payload
        .get("totalResults")
        .and_then(parse_total)
        .unwrap_or(articles.len() as u64);

    NormalizedResult { total, articles }
}

fn normalize_article(item: &Value) -> Option<NormalizedArticle> {
    let article = item.as_object()?;

    let source = article
        .get("source")
        .and_then(Value::as_object)
        .and_then(|s| string_field(s, "name"));

    Some(NormalizedArticle {
        source,
        title: string_field(article, "title"),
        description: string_field(article, "description"),
        url: string_field(article, "url"),
        published: string_field(article, "publishedAt"),
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn parse_total(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
