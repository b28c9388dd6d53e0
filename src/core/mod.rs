//! Request-dispatch and conditional-caching engine.
//!
//! Every request travels the same path:
//!
//! ```text
//! Dispatcher -> Resource handler -> Lifecycle engine
//!            -> Resource locator / model mutation -> Version tagger
//!            -> Failure mapper (on error) -> response
//! ```
//!
//! # Modules
//!
//! - [`server`] - Axum routing, the request lifecycle and per-resource handlers
//! - [`locator`] - Top-down lookup of an identifier chain in the model tree
//! - [`tagger`] - Version tokens for located entities
//! - [`traits`] - The model interface the engine consumes
//! - [`types`] - Resource kinds, version tokens and outcomes
//! - [`error`] - Failure taxonomy and its HTTP mapping

pub mod error;
pub mod locator;
pub mod server;
pub mod tagger;
pub mod traits;
pub mod types;

pub use error::{Result, StaggerError};
pub use locator::{locate, Located};
pub use traits::{ModelStore, ModelView, Node, SharedModel};
pub use types::{Outcome, ResourceKind, Segment, Verb, VersionToken};
