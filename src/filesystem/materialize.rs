use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use snafu::Snafu;
use tracing::{debug, error, info};

use crate::{
    blueprint::{Blueprint, Node},
    ext::BestEffortPathExt,
};

use super::{EntryKind, MaterializeReport, NodeOutcome};

/// How a failed folder or file affects the rest of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorPolicy {
    /// Record the failure, skip what lies below it and carry on with siblings
    #[default]
    Continue,
    /// Stop at the first failure
    FailFast,
}

pub struct Materializer {
    policy: ErrorPolicy,
}

impl Materializer {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// Creates every folder and empty file of `blueprint` below `base`.
    ///
    /// Missing intermediate folders, `base` included, are created along the
    /// way. Existing folders are left alone and existing files are truncated,
    /// so running twice gives the same tree.
    pub fn materialize(
        &self,
        base: &Path,
        blueprint: &Blueprint,
    ) -> Result<MaterializeReport, MaterializeError> {
        let mut report = MaterializeReport::default();
        self.materialize_into(base, blueprint, &mut report)?;
        info!(
            "Materialized blueprint into {}: {}",
            base.best_effort_path_display(),
            report.summary()
        );
        Ok(report)
    }

    fn materialize_into(
        &self,
        base: &Path,
        blueprint: &Blueprint,
        report: &mut MaterializeReport,
    ) -> Result<(), MaterializeError> {
        for (name, node) in blueprint.entries() {
            let Some(path) = self.create_directory_chain(base, name, report)? else {
                continue;
            };

            match node {
                Node::Directory(children) => self.materialize_into(&path, children, report)?,
                Node::FileList(files) => {
                    for file in files {
                        self.create_file(&path.join(file), report)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Creates the folders of a possibly multi-segment `name` one segment at
    /// a time, so every one of them gets its own outcome. Returns the final
    /// folder when all segments are usable.
    fn create_directory_chain(
        &self,
        base: &Path,
        name: &str,
        report: &mut MaterializeReport,
    ) -> Result<Option<PathBuf>, MaterializeError> {
        let mut path = base.to_path_buf();
        for segment in Path::new(name).components() {
            path.push(segment);
            if !self.create_directory(&path, report)? {
                return Ok(None);
            }
        }
        Ok(Some(path))
    }

    /// Returns whether the folder is usable afterwards
    fn create_directory(
        &self,
        path: &Path,
        report: &mut MaterializeReport,
    ) -> Result<bool, MaterializeError> {
        if path.is_dir() {
            debug!("Folder already exists: {}", path.display());
            report.push(NodeOutcome::existing(path));
            return Ok(true);
        }

        match fs::create_dir_all(path) {
            Ok(()) => {
                debug!("Created folder: {}", path.display());
                report.push(NodeOutcome::created(path, EntryKind::Directory));
                Ok(true)
            }
            Err(source) => self
                .handle_failure(path, EntryKind::Directory, source, report)
                .map(|()| false),
        }
    }

    fn create_file(
        &self,
        path: &Path,
        report: &mut MaterializeReport,
    ) -> Result<(), MaterializeError> {
        match File::create(path) {
            Ok(_) => {
                debug!("Created file: {}", path.display());
                report.push(NodeOutcome::created(path, EntryKind::File));
                Ok(())
            }
            Err(source) => self.handle_failure(path, EntryKind::File, source, report),
        }
    }

    fn handle_failure(
        &self,
        path: &Path,
        kind: EntryKind,
        source: io::Error,
        report: &mut MaterializeReport,
    ) -> Result<(), MaterializeError> {
        match self.policy {
            ErrorPolicy::FailFast => Err(MaterializeError {
                kind,
                path: path.to_path_buf(),
                source,
            }),
            ErrorPolicy::Continue => {
                error!("Failed to create {} {}: {}", kind, path.display(), source);
                report.push(NodeOutcome::failed(path, kind, &source));
                Ok(())
            }
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to create {} {}", kind, path.best_effort_path_display()))]
pub struct MaterializeError {
    kind: EntryKind,
    path: PathBuf,
    source: io::Error,
}
