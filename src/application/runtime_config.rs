use std::path::PathBuf;

use crate::{cli::Cli, filesystem::ErrorPolicy};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub blueprint: Option<PathBuf>,
    pub policy: ErrorPolicy,
    pub print_tree: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            blueprint: cli.blueprint,
            policy: cli.policy,
            print_tree: !cli.no_tree,
        }
    }
}
