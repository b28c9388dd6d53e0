//! The model interface consumed by the dispatch engine.
//!
//! The engine never owns entity state. It reads through a [`ModelView`] borrowed
//! for the duration of one request and writes through the mutation methods on
//! [`ModelStore`]. Implementations decide how calls are serialized; the engine
//! only assumes each call is atomic on its own.

use crate::core::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Shared handle to the model, injected into every request.
pub type SharedModel = Arc<dyn ModelStore>;

/// A repository, branch, tag or artifact.
pub trait Node {
    /// Serializable representation, including descendants.
    fn data(&self) -> Value;

    /// Content digest, unquoted.
    fn digest(&self) -> &str;

    /// Exact, case-sensitive child lookup.
    fn child(&self, id: &str) -> Option<&dyn Node>;
}

/// Read access to the model root.
pub trait ModelView {
    /// Global revision counter, bumped on every mutation.
    fn revision(&self) -> u64;

    /// Whole-model summary.
    fn data(&self) -> Value;

    fn repo(&self, repo_id: &str) -> Option<&dyn Node>;
}

/// Storage and mutation of the repository tree.
///
/// Every `put_*` is an upsert of the addressed entity; parents must already
/// exist. Every `delete_*` fails with `NotFound` if the entity is absent.
/// Schema violations are reported as `InvalidData`.
pub trait ModelStore: Send + Sync + 'static {
    /// Borrow a consistent read view. Held only for synchronous work.
    fn view(&self) -> Box<dyn ModelView + '_>;

    fn put_repo(&self, repo_id: &str, data: Value) -> Result<()>;

    fn put_branch(&self, repo_id: &str, branch_id: &str, data: Value) -> Result<()>;

    fn put_tag(&self, repo_id: &str, branch_id: &str, tag_id: &str, data: Value) -> Result<()>;

    fn put_artifact(
        &self,
        repo_id: &str,
        branch_id: &str,
        tag_id: &str,
        artifact_id: &str,
        data: Value,
    ) -> Result<()>;

    fn delete_repo(&self, repo_id: &str) -> Result<()>;

    fn delete_branch(&self, repo_id: &str, branch_id: &str) -> Result<()>;

    fn delete_tag(&self, repo_id: &str, branch_id: &str, tag_id: &str) -> Result<()>;

    fn delete_artifact(
        &self,
        repo_id: &str,
        branch_id: &str,
        tag_id: &str,
        artifact_id: &str,
    ) -> Result<()>;
}
