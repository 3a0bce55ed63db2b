//! Deterministic cache key derivation.

use crate::domain::entities::QueryParameters;
use sha2::{Digest, Sha256};

/// Derives the cache key for a request.
///
/// The parameters are serialized canonically (sorted keys, ISO-8601 dates),
/// hashed with SHA-256 and rendered as lowercase hex. The result has the form
/// `"{prefix}:{digest}"`, so the prefix keeps different endpoints apart even
/// when their parameters coincide.
///
/// # Examples
///
/// ```ignore
/// let a = QueryParameters::new().with("q", "rust").with("from", "2026-01-01");
/// let b = QueryParameters::new().with("from", "2026-01-01").with("q", "rust");
/// assert_eq!(derive_key("news:range", &a), derive_key("news:range", &b));
/// ```
pub fn derive_key(prefix: &str, params: &QueryParameters) -> String {
    let digest = Sha256::digest(params.canonical_json().as_bytes());
    format!("{}:{}", prefix, hex::encode(digest))
}
