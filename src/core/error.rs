//! Error types for stagger operations.
//!
//! Every failure raised while serving a request is a [`StaggerError`]. Failures
//! travel unmodified through the request lifecycle as `Err` values and are mapped
//! to an HTTP response exactly once, at the outermost handler boundary, through
//! the [`IntoResponse`] implementation below.
//!
//! # Error Categories
//!
//! | Category | Variants | Status |
//! |----------|----------|--------|
//! | Lookup | `NotFound`, `RouteNotFound` | 404 |
//! | Payload | `BadPayload`, `InvalidData` | 400 |
//! | Payload | `PayloadTooLarge` | 413 |
//! | Internal | `Internal`, `Io`, `Config` | 500 |
//!
//! # Examples
//!
//! ```
//! use stagger::{ResourceKind, StaggerError};
//!
//! let err = StaggerError::NotFound { kind: ResourceKind::Repo, id: "acme".into() };
//! assert_eq!(err.to_string(), "Not found: repo 'acme'");
//! assert_eq!(err.status().as_u16(), 404);
//! ```

use crate::core::types::{ResourceKind, Segment};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::io;
use thiserror::Error;

/// Result type for stagger operations.
pub type Result<T> = std::result::Result<T, StaggerError>;

/// Errors that can occur while serving the data model.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StaggerError {
    /// An identifier is missing at some level of the hierarchy.
    ///
    /// Names the first missing segment; deeper segments are never consulted.
    #[error("Not found: {kind} '{id}'")]
    NotFound { kind: ResourceKind, id: String },

    /// No route matches the method and path.
    #[error("Not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// The request body is not valid JSON.
    #[error("Bad request: Failure decoding JSON: {0}")]
    BadPayload(#[source] serde_json::Error),

    /// The request body exceeds the configured limit and was not buffered.
    #[error("Payload too large: body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The payload decoded but violates the model's schema.
    #[error("Bad request: Illegal data: {0}")]
    InvalidData(String),

    /// Unreachable engine state. Never user-facing.
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error while binding, serving or reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid server configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StaggerError {
    /// Lookup miss for a single path segment.
    #[must_use]
    pub fn not_found(segment: &Segment) -> Self {
        StaggerError::NotFound {
            kind: segment.kind,
            id: segment.id.clone(),
        }
    }

    /// HTTP status this failure maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            StaggerError::NotFound { .. } | StaggerError::RouteNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            StaggerError::BadPayload(_) | StaggerError::InvalidData(_) => StatusCode::BAD_REQUEST,
            StaggerError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            StaggerError::Internal(_) | StaggerError::Io(_) | StaggerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for failures caused by the request rather than the server.
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for StaggerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.is_client_error() {
            tracing::warn!(status = status.as_u16(), "{}", self);
            (status, self.to_string()).into_response()
        } else {
            tracing::error!(status = status.as_u16(), "{}", self);
            (status, "Internal server error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_json() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_not_found_names_segment() {
        let segment = Segment::new(ResourceKind::Branch, "main");
        let err = StaggerError::not_found(&segment);
        assert_eq!(err.to_string(), "Not found: branch 'main'");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_route_not_found() {
        let err = StaggerError::RouteNotFound {
            method: "POST".into(),
            path: "/api/data".into(),
        };
        assert_eq!(err.to_string(), "Not found: POST /api/data");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_payload_includes_decode_error() {
        let err = StaggerError::BadPayload(bad_json());
        let message = err.to_string();
        assert!(message.starts_with("Bad request: Failure decoding JSON: "));
        assert!(message.contains("line 1"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_data_message() {
        let err = StaggerError::InvalidData("repo data must be a JSON object".into());
        assert_eq!(
            err.to_string(),
            "Bad request: Illegal data: repo data must be a JSON object"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_payload_too_large() {
        let err = StaggerError::PayloadTooLarge { limit: 16 };
        assert_eq!(err.to_string(), "Payload too large: body exceeds 16 bytes");
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_internal_is_not_client_error() {
        assert!(!StaggerError::Internal("unreachable".into()).is_client_error());
        assert!(!StaggerError::Config("bad port".into()).is_client_error());
    }

    #[test]
    fn test_internal_response_hides_details() {
        let response = StaggerError::Internal("lock poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get("etag").is_none());
    }

    #[test]
    fn test_error_response_is_plain_text() {
        let response = StaggerError::InvalidData("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }
}
