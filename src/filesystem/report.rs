use std::{
    io,
    path::{Path, PathBuf},
};

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryKind {
    #[display("folder")]
    Directory,
    #[display("file")]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Created,
    /// The folder was already there; files are always recreated
    Existing,
    Failed {
        error_kind: io::ErrorKind,
        message: String,
    },
}

/// Result of creating a single folder or file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOutcome {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub status: OutcomeStatus,
}

impl NodeOutcome {
    pub fn created(path: &Path, kind: EntryKind) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            status: OutcomeStatus::Created,
        }
    }

    pub fn existing(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: EntryKind::Directory,
            status: OutcomeStatus::Existing,
        }
    }

    pub fn failed(path: &Path, kind: EntryKind, error: &io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            status: OutcomeStatus::Failed {
                error_kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[display(
    "{directories} folders created, {existing} already present, {files} files created, {failures} failed"
)]
pub struct Summary {
    pub directories: usize,
    pub existing: usize,
    pub files: usize,
    pub failures: usize,
}

/// Outcomes of one materialization, in the order they were attempted
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
    outcomes: Vec<NodeOutcome>,
}

impl MaterializeReport {
    pub(super) fn push(&mut self, outcome: NodeOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[NodeOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn summary(&self) -> Summary {
        self.outcomes
            .iter()
            .fold(Summary::default(), |mut summary, outcome| {
                match (&outcome.status, outcome.kind) {
                    (OutcomeStatus::Failed { .. }, _) => summary.failures += 1,
                    (OutcomeStatus::Existing, _) => summary.existing += 1,
                    (OutcomeStatus::Created, EntryKind::Directory) => summary.directories += 1,
                    (OutcomeStatus::Created, EntryKind::File) => summary.files += 1,
                }
                summary
            })
    }
}
