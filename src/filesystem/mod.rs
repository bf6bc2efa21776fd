//! Turns blueprints into folders and files on disk, and walks the result.
//!
//! [`Materializer`] creates every folder and empty file a blueprint
//! describes and records one [`NodeOutcome`] per attempted entry.
//! [`TreeWalk`] enumerates the folders below a path for display.

mod materialize;
mod report;
mod tree;

pub use materialize::{ErrorPolicy, MaterializeError, Materializer};
pub use report::{EntryKind, MaterializeReport, NodeOutcome, OutcomeStatus};
pub use tree::TreeWalk;
