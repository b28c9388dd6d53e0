//! Resource handlers.
//!
//! Each resource kind supplies three capabilities to the lifecycle engine:
//! how to mutate it (PUT/DELETE), how to resolve its identifier chain, and which
//! entity to bind for reading. [`Resource`] is that dispatch table; the axum
//! handlers below only extract path parameters and hand over.
//!
//! Handlers never let an axum rejection escape. The method is checked first,
//! then path parameters, and the body is buffered only for PUT, so every
//! failure goes through [`StaggerError`]'s response mapping.

use super::lifecycle::{self, LifecycleRequest};
use super::middleware::{BodyLimit, ConditionalState};
use crate::core::error::{Result, StaggerError};
use crate::core::locator::{locate, Located};
use crate::core::traits::{ModelStore, ModelView, SharedModel};
use crate::core::types::{ResourceKind, Segment, Verb};
use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::fmt;
use std::io;
use std::sync::Arc;

const CHAIN_KINDS: [ResourceKind; 4] = [
    ResourceKind::Repo,
    ResourceKind::Branch,
    ResourceKind::Tag,
    ResourceKind::Artifact,
];

/// An addressed resource, one variant per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// The whole model. Read-only.
    Model,
    Repo {
        repo_id: String,
    },
    Branch {
        repo_id: String,
        branch_id: String,
    },
    Tag {
        repo_id: String,
        branch_id: String,
        tag_id: String,
    },
    Artifact {
        repo_id: String,
        branch_id: String,
        tag_id: String,
        artifact_id: String,
    },
}

impl Resource {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Model => ResourceKind::Model,
            Resource::Repo { .. } => ResourceKind::Repo,
            Resource::Branch { .. } => ResourceKind::Branch,
            Resource::Tag { .. } => ResourceKind::Tag,
            Resource::Artifact { .. } => ResourceKind::Artifact,
        }
    }

    /// Identifier chain for the locator, outermost first.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let ids: Vec<&str> = match self {
            Resource::Model => Vec::new(),
            Resource::Repo { repo_id } => vec![repo_id.as_str()],
            Resource::Branch { repo_id, branch_id } => vec![repo_id.as_str(), branch_id.as_str()],
            Resource::Tag {
                repo_id,
                branch_id,
                tag_id,
            } => vec![repo_id.as_str(), branch_id.as_str(), tag_id.as_str()],
            Resource::Artifact {
                repo_id,
                branch_id,
                tag_id,
                artifact_id,
            } => vec![
                repo_id.as_str(),
                branch_id.as_str(),
                tag_id.as_str(),
                artifact_id.as_str(),
            ],
        };

        ids.into_iter()
            .zip(CHAIN_KINDS)
            .map(|(id, kind)| Segment::new(kind, id))
            .collect()
    }

    /// Whether the dispatcher routes `verb` to this resource.
    #[must_use]
    pub fn allows(&self, verb: Verb) -> bool {
        allows(self.kind(), verb)
    }

    /// Upsert `data` at this resource's path.
    pub fn put(&self, model: &dyn ModelStore, data: Value) -> Result<()> {
        match self {
            Resource::Model => Err(StaggerError::Internal("the model root is read-only".into())),
            Resource::Repo { repo_id } => model.put_repo(repo_id, data),
            Resource::Branch { repo_id, branch_id } => model.put_branch(repo_id, branch_id, data),
            Resource::Tag {
                repo_id,
                branch_id,
                tag_id,
            } => model.put_tag(repo_id, branch_id, tag_id, data),
            Resource::Artifact {
                repo_id,
                branch_id,
                tag_id,
                artifact_id,
            } => model.put_artifact(repo_id, branch_id, tag_id, artifact_id, data),
        }
    }

    /// Remove the entity at this resource's path.
    pub fn delete(&self, model: &dyn ModelStore) -> Result<()> {
        match self {
            Resource::Model => Err(StaggerError::Internal("the model root is read-only".into())),
            Resource::Repo { repo_id } => model.delete_repo(repo_id),
            Resource::Branch { repo_id, branch_id } => model.delete_branch(repo_id, branch_id),
            Resource::Tag {
                repo_id,
                branch_id,
                tag_id,
            } => model.delete_tag(repo_id, branch_id, tag_id),
            Resource::Artifact {
                repo_id,
                branch_id,
                tag_id,
                artifact_id,
            } => model.delete_artifact(repo_id, branch_id, tag_id, artifact_id),
        }
    }

    /// Bind the entity to read.
    pub fn select<'a>(&self, view: &'a dyn ModelView) -> Result<Located<'a>> {
        locate(view, &self.segments())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.segments().last() {
            Some(segment) => write!(f, "{}", segment),
            None => f.write_str("model"),
        }
    }
}

/// The model root is read-only; every other kind serves all four verbs.
fn allows(kind: ResourceKind, verb: Verb) -> bool {
    kind != ResourceKind::Model || !verb.is_mutation()
}

/// Request parts every handler needs, read from the extensions that
/// `request_context` and the router install.
pub(crate) struct RequestScope {
    model: SharedModel,
    conditional: Arc<ConditionalState>,
    body_limit: usize,
    method: Method,
    uri: Uri,
}

impl RequestScope {
    fn route_not_found(&self) -> Response {
        route_not_found(&self.method, &self.uri)
    }
}

impl<S> FromRequestParts<S> for RequestScope
where
    S: Send + Sync,
{
    type Rejection = StaggerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let model = parts.extensions.get::<SharedModel>().cloned();
        let conditional = parts.extensions.get::<Arc<ConditionalState>>().cloned();
        let limit = parts.extensions.get::<BodyLimit>().copied();

        match (model, conditional, limit) {
            (Some(model), Some(conditional), Some(BodyLimit(body_limit))) => Ok(RequestScope {
                model,
                conditional,
                body_limit,
                method: parts.method.clone(),
                uri: parts.uri.clone(),
            }),
            _ => Err(StaggerError::Internal(
                "request context missing from extensions".into(),
            )),
        }
    }
}

/// Shared tail of every resource handler.
async fn dispatch(
    scope: RequestScope,
    kind: ResourceKind,
    resource: std::result::Result<Resource, PathRejection>,
    body: Body,
) -> Response {
    let Some(verb) = Verb::from_method(&scope.method).filter(|verb| allows(kind, *verb)) else {
        return scope.route_not_found();
    };

    let resource = match resource {
        Ok(resource) => resource,
        Err(rejection) => {
            tracing::debug!("unusable path parameters: {}", rejection);
            return scope.route_not_found();
        }
    };

    let body = if verb == Verb::Put {
        match read_body(body, scope.body_limit).await {
            Ok(body) => body,
            Err(err) => return err.into_response(),
        }
    } else {
        Bytes::new()
    };

    tracing::debug!(%verb, %resource, "dispatch");
    let request = LifecycleRequest {
        verb,
        resource: &resource,
        if_none_match: scope.conditional.presented_token(),
        body: &body,
    };
    lifecycle::respond(scope.model.as_ref(), &request)
}

/// Buffer a PUT body, refusing anything above `limit` bytes.
async fn read_body(body: Body, limit: usize) -> Result<Bytes> {
    axum::body::to_bytes(body, limit).await.map_err(|err| {
        let source = err.into_inner();
        if source.is::<LengthLimitError>() {
            StaggerError::PayloadTooLarge { limit }
        } else {
            StaggerError::Io(io::Error::other(source))
        }
    })
}

fn route_not_found(method: &Method, uri: &Uri) -> Response {
    StaggerError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into_response()
}

pub(crate) async fn handle_model(scope: RequestScope, body: Body) -> Response {
    dispatch(scope, ResourceKind::Model, Ok(Resource::Model), body).await
}

pub(crate) async fn handle_repo(
    scope: RequestScope,
    path: std::result::Result<Path<String>, PathRejection>,
    body: Body,
) -> Response {
    let resource = path.map(|Path(repo_id)| Resource::Repo { repo_id });
    dispatch(scope, ResourceKind::Repo, resource, body).await
}

pub(crate) async fn handle_branch(
    scope: RequestScope,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
    body: Body,
) -> Response {
    let resource = path.map(|Path((repo_id, branch_id))| Resource::Branch { repo_id, branch_id });
    dispatch(scope, ResourceKind::Branch, resource, body).await
}

pub(crate) async fn handle_tag(
    scope: RequestScope,
    path: std::result::Result<Path<(String, String, String)>, PathRejection>,
    body: Body,
) -> Response {
    let resource = path.map(|Path((repo_id, branch_id, tag_id))| Resource::Tag {
        repo_id,
        branch_id,
        tag_id,
    });
    dispatch(scope, ResourceKind::Tag, resource, body).await
}

pub(crate) async fn handle_artifact(
    scope: RequestScope,
    path: std::result::Result<Path<(String, String, String, String)>, PathRejection>,
    body: Body,
) -> Response {
    let resource = path.map(|Path((repo_id, branch_id, tag_id, artifact_id))| {
        Resource::Artifact {
            repo_id,
            branch_id,
            tag_id,
            artifact_id,
        }
    });
    dispatch(scope, ResourceKind::Artifact, resource, body).await
}

/// Fallback for paths matching no route.
pub(crate) async fn handle_unrouted(method: Method, uri: Uri) -> Response {
    route_not_found(&method, &uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_body_within_limit() {
        let body = read_body(Body::from("{\"a\": 1}"), 64).await.unwrap();
        assert_eq!(&body[..], b"{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_read_body_over_limit() {
        let err = read_body(Body::from("x".repeat(64)), 16).await.unwrap_err();
        assert!(matches!(err, StaggerError::PayloadTooLarge { limit: 16 }));
    }

    #[test]
    fn test_only_model_refuses_mutation() {
        assert!(!allows(ResourceKind::Model, Verb::Put));
        assert!(allows(ResourceKind::Model, Verb::Head));
        assert!(allows(ResourceKind::Tag, Verb::Delete));
    }
}
