//! Resource kinds and the identifier chain that addresses them.

use std::fmt;

/// One of the five addressable entity kinds.
///
/// The kinds form a strict tree: the model root holds repositories, which hold
/// branches, which hold tags, which hold artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Model,
    Repo,
    Branch,
    Tag,
    Artifact,
}

impl ResourceKind {
    /// Lowercase name used in messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Model => "model",
            ResourceKind::Repo => "repo",
            ResourceKind::Branch => "branch",
            ResourceKind::Tag => "tag",
            ResourceKind::Artifact => "artifact",
        }
    }

    /// Kind of the entities directly below this one, if any.
    #[must_use]
    pub fn child_kind(&self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Model => Some(ResourceKind::Repo),
            ResourceKind::Repo => Some(ResourceKind::Branch),
            ResourceKind::Branch => Some(ResourceKind::Tag),
            ResourceKind::Tag => Some(ResourceKind::Artifact),
            ResourceKind::Artifact => None,
        }
    }

    /// Key under which children appear in this kind's serialized data.
    #[must_use]
    pub fn child_key(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Model => Some("repos"),
            ResourceKind::Repo => Some("branches"),
            ResourceKind::Branch => Some("tags"),
            ResourceKind::Tag => Some("artifacts"),
            ResourceKind::Artifact => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(kind, id)` step of an identifier chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub kind: ResourceKind,
    pub id: String,
}

impl Segment {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Segment {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_chain_ends_at_artifact() {
        let mut kind = ResourceKind::Model;
        let mut depth = 0;
        while let Some(next) = kind.child_kind() {
            kind = next;
            depth += 1;
        }
        assert_eq!(kind, ResourceKind::Artifact);
        assert_eq!(depth, 4);
    }

    #[test]
    fn test_child_keys() {
        assert_eq!(ResourceKind::Model.child_key(), Some("repos"));
        assert_eq!(ResourceKind::Repo.child_key(), Some("branches"));
        assert_eq!(ResourceKind::Branch.child_key(), Some("tags"));
        assert_eq!(ResourceKind::Tag.child_key(), Some("artifacts"));
        assert_eq!(ResourceKind::Artifact.child_key(), None);
    }

    #[test]
    fn test_segment_display() {
        let segment = Segment::new(ResourceKind::Tag, "v1.0");
        assert_eq!(segment.to_string(), "tag 'v1.0'");
    }
}
