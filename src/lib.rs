//! stagger: a repository/branch/tag/artifact data model served over HTTP.
//!
//! This crate is organised in two parts:
//!
//! - **core**: the request-dispatch and conditional-caching engine (routing,
//!   resource location, version tokens, failure mapping).
//! - **model**: the default in-memory model the engine serves.
//!
//! ```ignore
//! use std::sync::Arc;
//! use stagger::{run_server, InMemoryModel, ServerConfig};
//!
//! let model = Arc::new(InMemoryModel::new());
//! run_server(ServerConfig::default(), model).await?;
//! ```

pub mod core;
pub mod model;

// Top-level re-exports for common usage
pub use crate::core::error::{Result, StaggerError};
pub use crate::core::server::{run_server, stagger_router, stagger_service, ServerConfig};
pub use crate::core::traits::{ModelStore, ModelView, Node, SharedModel};
pub use crate::core::types::{Outcome, ResourceKind, Segment, Verb, VersionToken};
pub use crate::model::InMemoryModel;
