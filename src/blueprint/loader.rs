use std::{
    fs,
    path::{Path, PathBuf},
};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

use super::{Blueprint, BlueprintValidationError, Node, duplicate_keys, node::entry_label};

const BLUEPRINT_FILE_NAME: &str = "scaffold.yaml";

fn get_blueprint_file_path(root: &Path) -> PathBuf {
    root.join(BLUEPRINT_FILE_NAME)
}

/// Where the blueprint for a run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlueprintSource {
    File(PathBuf),
    Builtin,
}

impl BlueprintSource {
    /// An explicit file wins, then `scaffold.yaml` inside `root`, then the
    /// built-in Student Event Page layout.
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Self {
        if let Some(path) = explicit {
            return BlueprintSource::File(path.to_path_buf());
        }

        let candidate = get_blueprint_file_path(root);
        if candidate.is_file() {
            debug!(
                "Found blueprint file {}",
                candidate.best_effort_path_display()
            );
            BlueprintSource::File(candidate)
        } else {
            debug!("No blueprint file found, using the built-in blueprint");
            BlueprintSource::Builtin
        }
    }

    /// Loads the blueprint and validates every name in it.
    pub fn load(&self) -> Result<Blueprint, BlueprintLoadError> {
        let blueprint = match self {
            BlueprintSource::File(path) => Blueprint::from_path(path)?,
            BlueprintSource::Builtin => Blueprint::student_event_page(),
        };
        blueprint.validate().context(ValidationSnafu)?;
        Ok(blueprint)
    }
}

impl Blueprint {
    pub fn from_path(path: &Path) -> Result<Self, BlueprintLoadError> {
        debug!("Reading blueprint file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read blueprint file: {} bytes", contents.len());

        contents.as_str().try_into()
    }

    fn from_yaml_mapping(
        mapping: &LinkedHashMap<Yaml, Yaml>,
        parent: &str,
    ) -> Result<Self, BlueprintLoadError> {
        let mut blueprint = Blueprint::new();

        for (key, value) in mapping {
            let name = key
                .as_str()
                .context(NonStringKeySnafu { parent })?
                .to_string();
            let label = entry_label(parent, &name);

            let node = match value {
                Yaml::Mapping(children) => {
                    Node::Directory(Self::from_yaml_mapping(children, &label)?)
                }
                Yaml::Sequence(items) => Node::FileList(Self::file_list_from_yaml(items, &label)?),
                Yaml::Value(Scalar::Null) => Node::FileList(Vec::new()),
                _ => return InvalidEntrySnafu { path: label }.fail(),
            };

            debug!("Parsed blueprint entry '{}'", label);
            blueprint.insert(name, node);
        }

        Ok(blueprint)
    }

    fn file_list_from_yaml(items: &[Yaml], label: &str) -> Result<Vec<String>, BlueprintLoadError> {
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .context(NonStringFileSnafu { path: label })
            })
            .collect()
    }
}

impl TryFrom<&str> for Blueprint {
    type Error = BlueprintLoadError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        // The loaded mappings keep only the last of repeated keys
        if let Some(path) = duplicate_keys::find_first(contents).context(ParseSnafu)? {
            return DuplicateEntrySnafu { path }.fail();
        }
        let document = documents.first().ok_or(BlueprintLoadError::EmptyDocument)?;

        let top_level = document
            .as_mapping()
            .ok_or(BlueprintLoadError::TopLevelNotMap)?;

        Self::from_yaml_mapping(top_level, "")
    }
}

#[derive(Debug, Snafu)]
pub enum BlueprintLoadError {
    #[snafu(display("Failed to read the blueprint file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the blueprint file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Blueprint file contains no YAML document"))]
    EmptyDocument,
    #[snafu(display("Top level of the blueprint should be a map"))]
    TopLevelNotMap,
    #[snafu(display("An entry below '{}' has a key that is not a string", parent))]
    NonStringKey { parent: String },
    #[snafu(display(
        "Entry '{}' should be a map, a list of file names or empty",
        path
    ))]
    InvalidEntry { path: String },
    #[snafu(display("File list of '{}' contains an item that is not a string", path))]
    NonStringFile { path: String },
    #[snafu(display("Entry '{}' is defined multiple times", path))]
    DuplicateEntry { path: String },
    #[snafu(display("Blueprint contains an invalid name"))]
    ValidationError { source: BlueprintValidationError },
}
