use std::path::PathBuf;

use clap::Parser;

use crate::{application::data::LogLevel, filesystem::ErrorPolicy};

/// Creates a directory tree with placeholder files from a blueprint.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory the blueprint is materialized into
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// YAML blueprint to use instead of `scaffold.yaml` or the built-in one
    #[clap(long, short)]
    pub blueprint: Option<PathBuf>,

    /// What to do when a folder or file cannot be created
    #[clap(long, short, default_value = "continue", value_enum)]
    pub policy: ErrorPolicy,

    /// Skip printing the resulting directory tree
    #[clap(long)]
    pub no_tree: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
