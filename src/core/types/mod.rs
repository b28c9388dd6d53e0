//! Core data types for the dispatch engine.

mod outcome;
mod resource;
mod verb;
mod version;

pub use outcome::{Outcome, ACK_BODY};
pub use resource::{ResourceKind, Segment};
pub use verb::Verb;
pub use version::VersionToken;
