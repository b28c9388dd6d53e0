//! Successful terminal states of the request lifecycle.

use crate::core::error::Result;
use crate::core::types::VersionToken;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// Body of every PUT/DELETE acknowledgement.
pub const ACK_BODY: &str = "OK\n";

fn json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// What a request ended in, before conversion to HTTP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// PUT or DELETE applied. No version token.
    Ack,
    /// GET rendered the entity.
    Render { body: Bytes, token: VersionToken },
    /// HEAD: the headers GET would send, without a body.
    Head { token: VersionToken },
    /// The presented token matches the current one.
    NotModified,
}

impl Outcome {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::NotModified => StatusCode::NOT_MODIFIED,
            _ => StatusCode::OK,
        }
    }

    /// Version token carried as response metadata, if any.
    #[must_use]
    pub fn token(&self) -> Option<&VersionToken> {
        match self {
            Outcome::Render { token, .. } | Outcome::Head { token } => Some(token),
            Outcome::Ack | Outcome::NotModified => None,
        }
    }

    /// Convert into an HTTP response.
    ///
    /// # Errors
    ///
    /// Fails if the version token cannot be sent as a header value.
    pub fn into_http(self) -> Result<Response> {
        let status = self.status();
        let response = match self {
            Outcome::Ack => (status, ACK_BODY).into_response(),
            Outcome::NotModified => status.into_response(),
            Outcome::Head { token } => (
                status,
                [
                    (header::CONTENT_TYPE, json()),
                    (header::ETAG, token.to_header_value()?),
                ],
            )
                .into_response(),
            Outcome::Render { body, token } => (
                status,
                [
                    (header::CONTENT_TYPE, json()),
                    (header::ETAG, token.to_header_value()?),
                ],
                body,
            )
                .into_response(),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_has_no_token() {
        let response = Outcome::Ack.into_http().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ETAG).is_none());
    }

    #[test]
    fn test_not_modified_has_no_token() {
        assert_eq!(Outcome::NotModified.status(), StatusCode::NOT_MODIFIED);
        assert!(Outcome::NotModified.token().is_none());
        let response = Outcome::NotModified.into_http().unwrap();
        assert!(response.headers().get(header::ETAG).is_none());
    }

    #[test]
    fn test_head_and_render_share_headers() {
        let token = VersionToken::from_revision(3);
        let head = Outcome::Head {
            token: token.clone(),
        }
        .into_http()
        .unwrap();
        let render = Outcome::Render {
            body: Bytes::from_static(b"{}"),
            token,
        }
        .into_http()
        .unwrap();

        assert_eq!(head.status(), render.status());
        assert_eq!(head.headers().get(header::ETAG), render.headers().get(header::ETAG));
        assert_eq!(
            head.headers().get(header::CONTENT_TYPE),
            render.headers().get(header::CONTENT_TYPE)
        );
    }
}
