//! Default in-memory model.
//!
//! The dispatch engine only talks to [`crate::core::ModelStore`]; this module is
//! the implementation the binary serves.
//!
//! # Digest policy
//!
//! Digests are Merkle-style: an entity's digest covers its serialized data,
//! which includes all of its descendants. Changing an artifact therefore changes
//! the digests of its tag, branch and repository too. The global revision is
//! bumped once per successful mutation, including rewrites that change nothing.

mod digest;
mod entity;
mod memory;
mod schema;

pub use digest::content_digest;
pub use entity::Entity;
pub use memory::InMemoryModel;
pub use schema::{Draft, ARTIFACT_TYPES};
