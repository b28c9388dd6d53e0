use super::digest::content_digest;
use super::schema::Draft;
use crate::core::traits::Node;
use crate::core::types::ResourceKind;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A stored repository, branch, tag or artifact.
///
/// The digest is kept in step with the content: every mutating method ends by
/// recomputing it. Ancestors are refreshed by the tree after a nested change.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    kind: ResourceKind,
    fields: Map<String, Value>,
    children: BTreeMap<String, Entity>,
    digest: String,
}

impl Entity {
    pub(crate) fn new(
        kind: ResourceKind,
        fields: Map<String, Value>,
        children: BTreeMap<String, Entity>,
    ) -> Self {
        let mut entity = Entity {
            kind,
            fields,
            children,
            digest: String::new(),
        };
        entity.refresh_digest();
        entity
    }

    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Own fields, without the child collection.
    #[inline]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[inline]
    pub fn children(&self) -> &BTreeMap<String, Entity> {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut BTreeMap<String, Entity> {
        &mut self.children
    }

    /// Replace own fields with the draft's. Children are replaced only when the
    /// draft carries a child collection.
    pub(crate) fn replace(&mut self, draft: Draft) {
        let (fields, children) = draft.into_parts();
        self.fields = fields;
        if let Some(children) = children {
            self.children = children;
        }
        self.refresh_digest();
    }

    pub(crate) fn refresh_digest(&mut self) {
        self.digest = content_digest(&self.data());
    }
}

impl Node for Entity {
    fn data(&self) -> Value {
        let mut data = self.fields.clone();
        if let Some(key) = self.kind.child_key() {
            let children = self
                .children
                .iter()
                .map(|(id, child)| (id.clone(), child.data()))
                .collect();
            data.insert(key.to_string(), Value::Object(children));
        }
        Value::Object(data)
    }

    fn digest(&self) -> &str {
        &self.digest
    }

    fn child(&self, id: &str) -> Option<&dyn Node> {
        self.children.get(id).map(|child| child as &dyn Node)
    }
}
