//! Opaque version tokens sent as `ETag` and compared against `If-None-Match`.
//!
//! A token is either the model's global revision counter or an entity's content
//! digest. Both are wrapped in double quotes the same way, so tokens obtained
//! from different requests compare directly as strings:
//!
//! ```text
//! ETag: "42"
//! ETag: "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
//! ```
//!
//! The engine never parses a token. It only checks equality.
//!
//! # Examples
//!
//! ```
//! use stagger::VersionToken;
//!
//! let token = VersionToken::from_revision(7);
//! assert_eq!(token.as_str(), "\"7\"");
//! assert!(token.matches(Some("\"7\"")));
//! assert!(!token.matches(Some("7")));
//! assert!(!token.matches(None));
//! ```

use crate::core::error::{Result, StaggerError};
use axum::http::HeaderValue;
use std::fmt;

/// Quoted, opaque version token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionToken(String);

impl VersionToken {
    /// Token for the model root.
    #[must_use]
    pub fn from_revision(revision: u64) -> Self {
        Self::quoted(&revision.to_string())
    }

    /// Token for a repository, branch, tag or artifact.
    #[must_use]
    pub fn from_digest(digest: &str) -> Self {
        Self::quoted(digest)
    }

    fn quoted(raw: &str) -> Self {
        VersionToken(format!("\"{}\"", raw))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison with a caller-presented token.
    #[inline]
    #[must_use]
    pub fn matches(&self, presented: Option<&str>) -> bool {
        presented == Some(self.0.as_str())
    }

    /// Header value for the `ETag` response header.
    ///
    /// # Errors
    ///
    /// Fails with [`StaggerError::Internal`] if the model produced a digest that
    /// is not a legal header value.
    pub fn to_header_value(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.0).map_err(|e| {
            StaggerError::Internal(format!("unusable version token {}: {}", self.0, e))
        })
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_and_digest_share_quoting() {
        assert_eq!(VersionToken::from_revision(0).as_str(), "\"0\"");
        assert_eq!(VersionToken::from_digest("abc").as_str(), "\"abc\"");
        assert_eq!(VersionToken::from_revision(12), VersionToken::from_digest("12"));
    }

    #[test]
    fn test_matches_is_exact() {
        let token = VersionToken::from_digest("abc");
        assert!(token.matches(Some("\"abc\"")));
        assert!(!token.matches(Some("abc")));
        assert!(!token.matches(Some("W/\"abc\"")));
        assert!(!token.matches(Some("\"ABC\"")));
    }

    #[test]
    fn test_header_value() {
        let token = VersionToken::from_digest("deadbeef");
        assert_eq!(token.to_header_value().unwrap(), "\"deadbeef\"");
    }

    #[test]
    fn test_header_value_rejects_control_chars() {
        let token = VersionToken::from_digest("bad\nvalue");
        assert!(matches!(
            token.to_header_value(),
            Err(StaggerError::Internal(_))
        ));
    }
}
