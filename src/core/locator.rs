//! Resource locator: walks an identifier chain down the model tree.
//!
//! Lookup is strictly top-down. A miss at one level stops the walk and the
//! resulting `NotFound` names that level, never a deeper one.

use crate::core::error::{Result, StaggerError};
use crate::core::traits::{ModelView, Node};
use crate::core::types::Segment;
use serde_json::Value;

/// The entity at the end of an identifier chain.
#[derive(Clone, Copy)]
pub enum Located<'a> {
    /// Empty chain: the model root.
    Root(&'a dyn ModelView),
    Entity(&'a dyn Node),
}

impl Located<'_> {
    pub fn data(&self) -> Value {
        match self {
            Located::Root(view) => view.data(),
            Located::Entity(node) => node.data(),
        }
    }
}

impl std::fmt::Debug for Located<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Located::Root(view) => f.debug_tuple("Root").field(&view.revision()).finish(),
            Located::Entity(node) => f.debug_tuple("Entity").field(&node.digest()).finish(),
        }
    }
}

/// Resolve `segments` against `view`.
///
/// # Errors
///
/// Returns [`StaggerError::NotFound`] naming the first segment with no match.
pub fn locate<'a>(view: &'a dyn ModelView, segments: &[Segment]) -> Result<Located<'a>> {
    let Some((first, rest)) = segments.split_first() else {
        return Ok(Located::Root(view));
    };

    let mut node = view
        .repo(&first.id)
        .ok_or_else(|| StaggerError::not_found(first))?;
    for segment in rest {
        node = node
            .child(&segment.id)
            .ok_or_else(|| StaggerError::not_found(segment))?;
    }

    Ok(Located::Entity(node))
}
