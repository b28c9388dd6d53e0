//! Payload validation for entity upserts.
//!
//! A payload is accepted when it is a JSON object and its known fields have the
//! expected types. Unknown fields are stored as given.

use super::entity::Entity;
use crate::core::error::{Result, StaggerError};
use crate::core::types::ResourceKind;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Artifact kinds the model accepts in an artifact's `type` field.
pub const ARTIFACT_TYPES: [&str; 4] = ["container", "file", "maven", "rpm"];

const TAG_STRING_FIELDS: [&str; 4] = ["build_id", "build_url", "commit_id", "commit_url"];

/// A validated payload, ready to be stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    kind: ResourceKind,
    fields: Map<String, Value>,
    /// `None` when the payload omitted the child collection.
    children: Option<BTreeMap<String, Entity>>,
}

impl Draft {
    /// Validate `data` as the payload of a `kind` entity.
    ///
    /// # Errors
    ///
    /// Returns [`StaggerError::InvalidData`] describing the first violation.
    pub fn parse(kind: ResourceKind, data: Value) -> Result<Draft> {
        if kind == ResourceKind::Model {
            return Err(StaggerError::Internal(
                "the model root has no upsertable payload".into(),
            ));
        }

        let mut fields = match data {
            Value::Object(fields) => fields,
            other => {
                return Err(invalid(format!(
                    "{} data must be a JSON object, got {}",
                    kind,
                    type_name(&other)
                )))
            }
        };

        let children = match kind.child_key() {
            Some(key) => fields
                .remove(key)
                .map(|value| parse_children(kind, value))
                .transpose()?,
            None => None,
        };

        match kind {
            ResourceKind::Tag => check_tag(&fields)?,
            ResourceKind::Artifact => check_artifact(&fields)?,
            _ => {}
        }

        Ok(Draft {
            kind,
            fields,
            children,
        })
    }

    /// Build a fresh entity; an omitted child collection becomes empty.
    pub fn into_entity(self) -> Entity {
        Entity::new(self.kind, self.fields, self.children.unwrap_or_default())
    }

    pub(crate) fn into_parts(self) -> (Map<String, Value>, Option<BTreeMap<String, Entity>>) {
        (self.fields, self.children)
    }
}

/// Validate the child collection of a `parent` entity.
pub(crate) fn parse_children(
    parent: ResourceKind,
    value: Value,
) -> Result<BTreeMap<String, Entity>> {
    let (Some(key), Some(child_kind)) = (parent.child_key(), parent.child_kind()) else {
        return Err(StaggerError::Internal(format!("{} has no children", parent)));
    };

    let entries = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(invalid(format!(
                "'{}' must be a JSON object, got {}",
                key,
                type_name(&other)
            )))
        }
    };

    let mut children = BTreeMap::new();
    for (id, data) in entries {
        let draft = Draft::parse(child_kind, data).map_err(|e| nest(key, &id, e))?;
        children.insert(id, draft.into_entity());
    }
    Ok(children)
}

fn check_tag(fields: &Map<String, Value>) -> Result<()> {
    for name in TAG_STRING_FIELDS {
        match fields.get(name) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(invalid(format!(
                    "tag field '{}' must be a string, got {}",
                    name,
                    type_name(other)
                )))
            }
        }
    }
    Ok(())
}

fn check_artifact(fields: &Map<String, Value>) -> Result<()> {
    match fields.get("type") {
        Some(Value::String(kind)) if ARTIFACT_TYPES.contains(&kind.as_str()) => Ok(()),
        Some(Value::String(kind)) => Err(invalid(format!(
            "unknown artifact type '{}', expected one of {}",
            kind,
            ARTIFACT_TYPES.join(", ")
        ))),
        Some(other) => Err(invalid(format!(
            "artifact field 'type' must be a string, got {}",
            type_name(other)
        ))),
        None => Err(invalid("artifact is missing required field 'type'".into())),
    }
}

fn invalid(message: String) -> StaggerError {
    StaggerError::InvalidData(message)
}

/// Prefix a nested validation message with its location.
fn nest(key: &str, id: &str, err: StaggerError) -> StaggerError {
    match err {
        StaggerError::InvalidData(message) => invalid(format!("{}.{}: {}", key, id, message)),
        other => other,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
