use serde_json::Value;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the compact JSON encoding of `data`.
///
/// Object keys serialize in sorted order, so equal data always yields the same
/// digest.
#[must_use]
pub fn content_digest(data: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
