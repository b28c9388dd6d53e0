//! Request lifecycle engine.
//!
//! Every request runs the same fixed pipeline, parameterized by the
//! [`Resource`] it addresses:
//!
//! ```text
//! START -> DECODE -> {MUTATE | SELECT} -> [CONDITIONAL CHECK]
//!       -> {RENDER | NOT MODIFIED | ACK} -> END
//! ```
//!
//! 1. **Decode**: a PUT body is parsed as JSON before any handler code runs.
//! 2. **Mutate or select**: PUT/DELETE call the model and finish with an
//!    acknowledgement; GET/HEAD locate the target entity.
//! 3. **Conditional check**: the current version token is compared with the
//!    presented `If-None-Match`; a match ends the request as not modified.
//! 4. **Render**: GET serializes the entity; HEAD skips the body.
//! 5. **Tag**: rendered outcomes carry the token computed in step 3.
//!
//! Any step may fail. Failures are returned as `Err` and mapped to a response
//! once, in [`respond`].

use super::handlers::Resource;
use crate::core::error::{Result, StaggerError};
use crate::core::locator::Located;
use crate::core::tagger::version_token;
use crate::core::traits::ModelStore;
use crate::core::types::{Outcome, Verb};
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::Value;

/// Input to one lifecycle run.
#[derive(Clone, Copy, Debug)]
pub struct LifecycleRequest<'a> {
    pub verb: Verb,
    pub resource: &'a Resource,
    /// Caller-presented version token, if any.
    pub if_none_match: Option<&'a str>,
    pub body: &'a [u8],
}

/// Run the pipeline and return its terminal outcome.
///
/// # Errors
///
/// - [`StaggerError::BadPayload`] if a PUT body is not JSON
/// - [`StaggerError::InvalidData`] if the model rejects the payload
/// - [`StaggerError::NotFound`] if the target or one of its ancestors is missing
pub fn execute(model: &dyn ModelStore, req: &LifecycleRequest<'_>) -> Result<Outcome> {
    let payload = decode(req.verb, req.body)?;

    match req.verb {
        Verb::Put => {
            let payload = payload
                .ok_or_else(|| StaggerError::Internal("PUT without decoded payload".into()))?;
            req.resource.put(model, payload)?;
            tracing::info!("stored {}", req.resource);
            return Ok(Outcome::Ack);
        }
        Verb::Delete => {
            req.resource.delete(model)?;
            tracing::info!("deleted {}", req.resource);
            return Ok(Outcome::Ack);
        }
        Verb::Get | Verb::Head => {}
    }

    // The view is held from selection through render, so the token and the
    // body describe the same state.
    let view = model.view();
    let target = req.resource.select(&*view)?;

    let token = version_token(&target);
    if token.matches(req.if_none_match) {
        tracing::debug!(%token, "not modified");
        return Ok(Outcome::NotModified);
    }

    if req.verb == Verb::Head {
        return Ok(Outcome::Head { token });
    }

    let body = render(&target)?;
    Ok(Outcome::Render { body, token })
}

/// Run the pipeline and map its result to an HTTP response.
///
/// HEAD failures keep the status GET would get, without the message body.
pub fn respond(model: &dyn ModelStore, req: &LifecycleRequest<'_>) -> Response {
    match execute(model, req).and_then(Outcome::into_http) {
        Ok(response) => response,
        Err(err) if req.verb == Verb::Head => {
            let (parts, _) = err.into_response().into_parts();
            Response::from_parts(parts, Body::empty())
        }
        Err(err) => err.into_response(),
    }
}

fn decode(verb: Verb, body: &[u8]) -> Result<Option<Value>> {
    if verb != Verb::Put {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(StaggerError::BadPayload)
}

fn render(target: &Located<'_>) -> Result<Bytes> {
    serde_json::to_vec(&target.data())
        .map(Bytes::from)
        .map_err(|e| StaggerError::Internal(format!("render failed: {}", e)))
}
