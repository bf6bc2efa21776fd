//! Typed description of the directory tree to create.
//!
//! A [`Blueprint`] maps entry names to either a nested blueprint (a folder
//! with sub-folders) or a list of file names (a leaf folder). Blueprints are
//! either built in code or loaded from a YAML file.

mod builtin;
mod duplicate_keys;
mod loader;
mod node;

pub use loader::{BlueprintLoadError, BlueprintSource};
pub use node::{Blueprint, BlueprintValidationError, Node};
