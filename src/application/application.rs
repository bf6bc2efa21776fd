use std::path::{Path, PathBuf};

use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::blueprint::{Blueprint, BlueprintLoadError, BlueprintSource};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{
    EntryKind, MaterializeError, MaterializeReport, Materializer, NodeOutcome, OutcomeStatus,
    TreeWalk,
};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        colored::control::set_override(supports_color::on(Stream::Stdout).is_some());

        let source = BlueprintSource::resolve(app_config.blueprint.as_deref(), &app_config.root);
        let blueprint = source.load().context(BlueprintSnafu)?;
        debug!("Loaded blueprint from {:?}: {:?}", source, blueprint);
        if blueprint.is_empty() {
            warn!("Blueprint has no entries, nothing will be created");
        }

        info!(
            "Materializing {} top-level entries into {}",
            blueprint.len(),
            app_config.root.best_effort_path_display()
        );
        let report = Materializer::new(app_config.policy)
            .materialize(&app_config.root, &blueprint)
            .context(MaterializationSnafu)?;

        print_report(&report);
        if app_config.print_tree {
            print_trees(&app_config.root, &blueprint);
        }

        ensure!(
            !report.has_failures(),
            IncompleteRunSnafu {
                failures: report.failures().count()
            }
        );

        Ok(())
    }
}

fn print_report(report: &MaterializeReport) {
    for outcome in report.outcomes() {
        println!("{}", describe_outcome(outcome));
    }
    println!("{}", report.summary().to_string().bold());
}

fn describe_outcome(outcome: &NodeOutcome) -> String {
    let path = outcome.path.display();
    match (&outcome.status, outcome.kind) {
        (OutcomeStatus::Created, EntryKind::Directory) => {
            format!("{} {}", "Created folder:".green(), path)
        }
        (OutcomeStatus::Created, EntryKind::File) => {
            format!("{} {}", "Created file:".green(), path)
        }
        (OutcomeStatus::Existing, _) => format!("{} {}", "Folder exists:".dimmed(), path),
        (OutcomeStatus::Failed { message, .. }, kind) => format!(
            "{} {}: {}",
            format!("Failed to create {kind}").red().bold(),
            path,
            message
        ),
    }
}

/// Prints the folder tree below every top-level blueprint entry that exists.
/// First segment of every top-level name, without repeats, so `a/b` and
/// `a/c` share the single tree rooted at `a`.
fn tree_roots(blueprint: &Blueprint) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for name in blueprint.names() {
        let Some(first) = Path::new(name).components().next() else {
            continue;
        };
        let first = PathBuf::from(first.as_os_str());
        if !roots.contains(&first) {
            roots.push(first);
        }
    }
    roots
}

fn print_trees(root: &Path, blueprint: &Blueprint) {
    for name in tree_roots(blueprint) {
        let tree_root = root.join(name);
        if !tree_root.is_dir() {
            debug!("Skipping tree of missing folder {}", tree_root.display());
            continue;
        }

        println!();
        for entry in TreeWalk::new(&tree_root) {
            match entry {
                Ok(entry) => println!("{}", entry.to_string().blue()),
                Err(e) => warn!("{}", e),
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the blueprint"))]
    BlueprintError { source: BlueprintLoadError },
    #[snafu(display("Critical failure encountered during materialization"))]
    MaterializationError { source: MaterializeError },
    #[snafu(display("Materialization finished with {} failed entries", failures))]
    IncompleteRunError { failures: usize },
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use tempfile::TempDir;

    use crate::filesystem::ErrorPolicy;

    use super::*;

    fn config(root: &Path, policy: ErrorPolicy) -> RuntimeConfig {
        RuntimeConfig {
            root: root.to_path_buf(),
            blueprint: None,
            policy,
            print_tree: true,
        }
    }

    #[test]
    fn builds_student_event_page_by_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = Application::run(config(temp_dir.path(), ErrorPolicy::Continue));

        assert!(result.is_ok());
        let project = temp_dir.path().join("StudentEventPage");
        assert!(project.join("frontend/react-app").is_dir());
        assert!(project.join("database/mongodb").is_dir());
        assert!(project.join("git/.gitignore").is_file());
    }

    #[test]
    fn uses_blueprint_file_found_in_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(
            temp_dir.path().join("scaffold.yaml"),
            "Root:\n  Sub: [c.txt]\n",
        )
        .unwrap();

        let result = Application::run(config(temp_dir.path(), ErrorPolicy::Continue));

        assert!(result.is_ok());
        assert!(temp_dir.path().join("Root/Sub/c.txt").is_file());
        assert!(!temp_dir.path().join("StudentEventPage").exists());
    }

    #[test]
    fn missing_blueprint_file_is_a_blueprint_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut app_config = config(temp_dir.path(), ErrorPolicy::Continue);
        app_config.blueprint = Some(PathBuf::from("does-not-exist.yaml"));

        let result = Application::run(app_config);

        assert!(matches!(result, Err(ApplicationError::BlueprintError { .. })));
    }

    #[test]
    fn failed_entries_make_the_run_incomplete() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("scaffold.yaml"), "Blocked: []\nOpen: [y.txt]\n").unwrap();
        fs::write(temp_dir.path().join("Blocked"), "").unwrap();

        let result = Application::run(config(temp_dir.path(), ErrorPolicy::Continue));

        assert!(matches!(
            result,
            Err(ApplicationError::IncompleteRunError { failures: 1 })
        ));
        assert!(temp_dir.path().join("Open/y.txt").is_file());
    }

    #[test]
    fn fail_fast_surfaces_the_materialization_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("scaffold.yaml"), "Blocked: []\nOpen: [y.txt]\n").unwrap();
        fs::write(temp_dir.path().join("Blocked"), "").unwrap();

        let result = Application::run(config(temp_dir.path(), ErrorPolicy::FailFast));

        assert!(matches!(
            result,
            Err(ApplicationError::MaterializationError { .. })
        ));
        assert!(!temp_dir.path().join("Open").exists());
    }

    #[test]
    fn describes_failures_with_their_message() {
        let outcome = NodeOutcome::failed(
            Path::new("Root/a.txt"),
            EntryKind::File,
            &io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );

        let line = describe_outcome(&outcome);
        assert!(line.contains("Failed to create file"));
        assert!(line.contains("Root/a.txt: permission denied"));
    }

    #[test]
    fn tree_roots_start_at_the_first_segment() {
        let blueprint = Blueprint::new()
            .with_empty_directory("a/b")
            .with_empty_directory("a/c")
            .with_directory("d", Blueprint::new().with_empty_directory("e/f"));

        assert_eq!(
            tree_roots(&blueprint),
            vec![PathBuf::from("a"), PathBuf::from("d")]
        );
    }

    #[test]
    fn multi_segment_top_level_names_are_walked_from_their_first_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("scaffold.yaml"), "a/b: [x.txt]
").unwrap();

        Application::run(config(temp_dir.path(), ErrorPolicy::Continue)).unwrap();

        let roots = tree_roots(&Blueprint::new().with_files("a/b", ["x.txt"]));
        let tree_root = temp_dir.path().join(&roots[0]);
        let lines = TreeWalk::new(&tree_root)
            .map(|entry| entry.unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(lines, vec!["a/", "    b/"]);
    }
}
