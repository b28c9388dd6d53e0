//! Thread-safe in-memory model.
//!
//! All state sits behind a single `RwLock`: mutations take the write lock, so
//! there is exactly one writer per call, while reads share the lock. A read view
//! holds the read guard, which keeps the version token and the rendered body of
//! one request describing the same state.

use super::entity::Entity;
use super::schema::{parse_children, Draft};
use crate::core::error::{Result, StaggerError};
use crate::core::traits::{ModelStore, ModelView, Node};
use crate::core::types::{ResourceKind, Segment};
use parking_lot::{RwLock, RwLockReadGuard};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default)]
struct Tree {
    revision: u64,
    repos: BTreeMap<String, Entity>,
}

impl ModelView for Tree {
    fn revision(&self) -> u64 {
        self.revision
    }

    fn data(&self) -> Value {
        let repos: Map<String, Value> = self
            .repos
            .iter()
            .map(|(id, repo)| (id.clone(), repo.data()))
            .collect();
        let mut data = Map::new();
        data.insert("repos".to_string(), Value::Object(repos));
        Value::Object(data)
    }

    fn repo(&self, repo_id: &str) -> Option<&dyn Node> {
        self.repos.get(repo_id).map(|repo| repo as &dyn Node)
    }
}

/// Read view holding the model's read lock.
struct TreeGuard<'a>(RwLockReadGuard<'a, Tree>);

impl ModelView for TreeGuard<'_> {
    fn revision(&self) -> u64 {
        self.0.revision()
    }

    fn data(&self) -> Value {
        self.0.data()
    }

    fn repo(&self, repo_id: &str) -> Option<&dyn Node> {
        self.0.repo(repo_id)
    }
}

/// In-memory [`ModelStore`].
///
/// # Examples
///
/// ```
/// use stagger::{InMemoryModel, ModelStore};
/// use serde_json::json;
///
/// let model = InMemoryModel::new();
/// model.put_repo("acme", json!({"name": "Acme"})).unwrap();
/// model.put_branch("acme", "main", json!({})).unwrap();
/// assert_eq!(model.revision(), 2);
///
/// assert!(model.put_branch("nope", "main", json!({})).is_err());
/// assert_eq!(model.revision(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryModel {
    tree: RwLock<Tree>,
}

impl InMemoryModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a snapshot shaped like the whole-model summary,
    /// `{"repos": {...}}`. The revision starts at 0.
    ///
    /// # Errors
    ///
    /// Returns [`StaggerError::InvalidData`] if any entity in the snapshot fails
    /// validation.
    pub fn from_data(data: Value) -> Result<Self> {
        let mut fields = match data {
            Value::Object(fields) => fields,
            _ => {
                return Err(StaggerError::InvalidData(
                    "model data must be a JSON object".into(),
                ))
            }
        };
        let repos = match fields.remove("repos") {
            Some(repos) => parse_children(ResourceKind::Model, repos)?,
            None => BTreeMap::new(),
        };
        if !fields.is_empty() {
            tracing::debug!(
                "ignoring unknown model keys: {:?}",
                fields.keys().collect::<Vec<_>>()
            );
        }

        Ok(Self {
            tree: RwLock::new(Tree { revision: 0, repos }),
        })
    }

    /// Load a snapshot file written in the whole-model summary format.
    ///
    /// # Errors
    ///
    /// Fails with [`StaggerError::Io`] if the file cannot be read,
    /// [`StaggerError::Config`] if it is not JSON, and
    /// [`StaggerError::InvalidData`] if the content is rejected.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path).await?;
        let data: Value = serde_json::from_slice(&content)
            .map_err(|e| StaggerError::Config(format!("seed file {}: {}", path.display(), e)))?;
        let model = Self::from_data(data)?;
        tracing::info!(
            "seeded model with {} repos from {}",
            model.tree.read().repos.len(),
            path.display()
        );
        Ok(model)
    }

    /// Current global revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.tree.read().revision
    }

    fn put(&self, path: &[Segment], data: Value) -> Result<()> {
        let target = path
            .last()
            .ok_or_else(|| StaggerError::Internal("empty put path".into()))?;
        let draft = Draft::parse(target.kind, data)?;

        let mut tree = self.tree.write();
        upsert(&mut tree.repos, path, draft)?;
        tree.revision += 1;
        tracing::debug!(revision = tree.revision, "stored {}", target);
        Ok(())
    }

    fn delete(&self, path: &[Segment]) -> Result<()> {
        let mut tree = self.tree.write();
        remove(&mut tree.repos, path)?;
        tree.revision += 1;
        if let Some(target) = path.last() {
            tracing::debug!(revision = tree.revision, "removed {}", target);
        }
        Ok(())
    }
}

/// Walk `path` inside `children` and upsert the draft at its end.
///
/// Ancestor digests are refreshed on the way back up, only after success.
fn upsert(children: &mut BTreeMap<String, Entity>, path: &[Segment], draft: Draft) -> Result<()> {
    match path {
        [] => Err(StaggerError::Internal("empty put path".into())),
        [target] => {
            match children.get_mut(&target.id) {
                Some(existing) => existing.replace(draft),
                None => {
                    children.insert(target.id.clone(), draft.into_entity());
                }
            }
            Ok(())
        }
        [parent, rest @ ..] => {
            let node = children
                .get_mut(&parent.id)
                .ok_or_else(|| StaggerError::not_found(parent))?;
            upsert(node.children_mut(), rest, draft)?;
            node.refresh_digest();
            Ok(())
        }
    }
}

fn remove(children: &mut BTreeMap<String, Entity>, path: &[Segment]) -> Result<()> {
    match path {
        [] => Err(StaggerError::Internal("empty delete path".into())),
        [target] => children
            .remove(&target.id)
            .map(|_| ())
            .ok_or_else(|| StaggerError::not_found(target)),
        [parent, rest @ ..] => {
            let node = children
                .get_mut(&parent.id)
                .ok_or_else(|| StaggerError::not_found(parent))?;
            remove(node.children_mut(), rest)?;
            node.refresh_digest();
            Ok(())
        }
    }
}

fn repo_path(repo_id: &str) -> Vec<Segment> {
    vec![Segment::new(ResourceKind::Repo, repo_id)]
}

fn branch_path(repo_id: &str, branch_id: &str) -> Vec<Segment> {
    let mut path = repo_path(repo_id);
    path.push(Segment::new(ResourceKind::Branch, branch_id));
    path
}

fn tag_path(repo_id: &str, branch_id: &str, tag_id: &str) -> Vec<Segment> {
    let mut path = branch_path(repo_id, branch_id);
    path.push(Segment::new(ResourceKind::Tag, tag_id));
    path
}

fn artifact_path(repo_id: &str, branch_id: &str, tag_id: &str, artifact_id: &str) -> Vec<Segment> {
    let mut path = tag_path(repo_id, branch_id, tag_id);
    path.push(Segment::new(ResourceKind::Artifact, artifact_id));
    path
}

impl ModelStore for InMemoryModel {
    fn view(&self) -> Box<dyn ModelView + '_> {
        Box::new(TreeGuard(self.tree.read()))
    }

    fn put_repo(&self, repo_id: &str, data: Value) -> Result<()> {
        self.put(&repo_path(repo_id), data)
    }

    fn put_branch(&self, repo_id: &str, branch_id: &str, data: Value) -> Result<()> {
        self.put(&branch_path(repo_id, branch_id), data)
    }

    fn put_tag(&self, repo_id: &str, branch_id: &str, tag_id: &str, data: Value) -> Result<()> {
        self.put(&tag_path(repo_id, branch_id, tag_id), data)
    }

    fn put_artifact(
        &self,
        repo_id: &str,
        branch_id: &str,
        tag_id: &str,
        artifact_id: &str,
        data: Value,
    ) -> Result<()> {
        self.put(&artifact_path(repo_id, branch_id, tag_id, artifact_id), data)
    }

    fn delete_repo(&self, repo_id: &str) -> Result<()> {
        self.delete(&repo_path(repo_id))
    }

    fn delete_branch(&self, repo_id: &str, branch_id: &str) -> Result<()> {
        self.delete(&branch_path(repo_id, branch_id))
    }

    fn delete_tag(&self, repo_id: &str, branch_id: &str, tag_id: &str) -> Result<()> {
        self.delete(&tag_path(repo_id, branch_id, tag_id))
    }

    fn delete_artifact(
        &self,
        repo_id: &str,
        branch_id: &str,
        tag_id: &str,
        artifact_id: &str,
    ) -> Result<()> {
        self.delete(&artifact_path(repo_id, branch_id, tag_id, artifact_id))
    }
}
