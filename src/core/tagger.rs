//! Version tagger.
//!
//! Tokens are derived from the located entity on every read. Nothing is cached
//! here, so a token always reflects the state the body is rendered from.

use crate::core::locator::Located;
use crate::core::types::VersionToken;

/// Current version token of a located entity.
///
/// The model root is tagged with the global revision, everything else with its
/// own content digest.
#[must_use]
pub fn version_token(target: &Located<'_>) -> VersionToken {
    match target {
        Located::Root(view) => VersionToken::from_revision(view.revision()),
        Located::Entity(node) => VersionToken::from_digest(node.digest()),
    }
}
