//! Request-context middleware.
//!
//! Runs in front of every route. It injects the shared model and the parsed
//! conditional-request headers into the request extensions, and wraps the
//! request in a tracing span.

use crate::core::traits::SharedModel;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::Instrument;

/// Largest request body a PUT may carry, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BodyLimit(pub usize);

/// Conditional-request state extracted from HTTP request headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionalState {
    /// Raw `If-None-Match` value. Compared verbatim against the current token.
    pub if_none_match: Option<String>,
}

impl ConditionalState {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        ConditionalState {
            if_none_match: headers
                .get(header::IF_NONE_MATCH)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }

    #[inline]
    #[must_use]
    pub fn presented_token(&self) -> Option<&str> {
        self.if_none_match.as_deref()
    }
}

pub(crate) async fn request_context(
    State(model): State<SharedModel>,
    mut req: Request,
    next: Next,
) -> Response {
    let span = tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
    );

    let conditional = ConditionalState::from_headers(req.headers());
    req.extensions_mut().insert(model);
    req.extensions_mut().insert(Arc::new(conditional));

    let response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| tracing::debug!(status = response.status().as_u16(), "done"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_empty_headers() {
        let state = ConditionalState::from_headers(&HeaderMap::new());
        assert!(state.if_none_match.is_none());
        assert!(state.presented_token().is_none());
    }

    #[test]
    fn test_if_none_match_kept_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert("if-none-match", HeaderValue::from_static("\"abc\""));
        let state = ConditionalState::from_headers(&headers);
        assert_eq!(state.presented_token(), Some("\"abc\""));
    }

    #[test]
    fn test_header_name_case_insensitive() {
        let mut headers = HeaderMap::new();
        let name = axum::http::HeaderName::from_bytes(b"If-None-Match").unwrap();
        headers.insert(name, HeaderValue::from_static("\"7\""));
        let state = ConditionalState::from_headers(&headers);
        assert_eq!(state.presented_token(), Some("\"7\""));
    }

    #[test]
    fn test_non_ascii_header_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "if-none-match",
            HeaderValue::from_bytes(b"\"\xff\"").unwrap(),
        );
        let state = ConditionalState::from_headers(&headers);
        assert!(state.if_none_match.is_none());
    }
}
