//! HTTP server for the repository model.
//!
//! # Module Organization
//!
//! ```text
//! server/
//! ├── config      - ServerConfig options
//! ├── middleware  - request span and conditional-header extraction
//! ├── handlers    - Resource dispatch table and axum handlers
//! ├── lifecycle   - decode / mutate-or-select / conditional / render pipeline
//! └── router      - route table and run_server
//! ```
//!
//! # Routes
//!
//! | Path | Methods |
//! |------|---------|
//! | `/api/data` | GET, HEAD |
//! | `/api/repos/{repo_id}` | GET, HEAD, PUT, DELETE |
//! | `/api/repos/{repo_id}/branches/{branch_id}` | GET, HEAD, PUT, DELETE |
//! | `.../tags/{tag_id}` | GET, HEAD, PUT, DELETE |
//! | `.../artifacts/{artifact_id}` | GET, HEAD, PUT, DELETE |
//!
//! Anything else answers 404 with `Not found: <METHOD> <path>`.
//!
//! # Example
//!
//! ```no_run
//! use stagger::{run_server, InMemoryModel, ServerConfig};
//! use std::sync::Arc;
//!
//! # async fn demo() -> stagger::Result<()> {
//! let model = Arc::new(InMemoryModel::new());
//! run_server(ServerConfig::default(), model).await
//! # }
//! ```

mod config;
mod handlers;
mod lifecycle;
mod middleware;
mod router;


pub use config::ServerConfig;
pub use handlers::Resource;
pub use lifecycle::{execute, respond, LifecycleRequest};
pub use middleware::ConditionalState;
pub use router::{run_server, stagger_router, stagger_service};
