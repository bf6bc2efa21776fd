use std::path::{Component, Path};

use hashlink::LinkedHashMap;
use snafu::Snafu;

/// Content of a single blueprint entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A folder whose content is described by a nested blueprint
    Directory(Blueprint),
    /// A leaf folder holding the listed (empty) files
    FileList(Vec<String>),
}

/// Ordered mapping from entry names to their content.
///
/// Entries keep their declaration order, so materializing and reporting
/// always visit them in the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blueprint {
    entries: LinkedHashMap<String, Node>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, name: impl Into<String>, children: Blueprint) -> Self {
        self.insert(name, Node::Directory(children));
        self
    }

    pub fn with_files<I, S>(mut self, name: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files = files.into_iter().map(Into::into).collect();
        self.insert(name, Node::FileList(files));
        self
    }

    pub fn with_empty_directory(mut self, name: impl Into<String>) -> Self {
        self.insert(name, Node::FileList(Vec::new()));
        self
    }

    /// Inserts an entry, returning the content it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(name.into(), node)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that every name stays below the folder it is created in.
    ///
    /// Folder names may span several segments (`frontend/react-app`), file
    /// names must be a single segment. Absolute names and `.`/`..` segments
    /// are rejected everywhere.
    pub fn validate(&self) -> Result<(), BlueprintValidationError> {
        self.validate_below("")
    }

    fn validate_below(&self, parent: &str) -> Result<(), BlueprintValidationError> {
        for (name, node) in &self.entries {
            let label = entry_label(parent, name);
            if let Some(reason) = name_problem(name, true) {
                return InvalidDirectoryNameSnafu { path: label, reason }.fail();
            }

            match node {
                Node::Directory(children) => children.validate_below(&label)?,
                Node::FileList(files) => {
                    for file in files {
                        if let Some(reason) = name_problem(file, false) {
                            return InvalidFileNameSnafu {
                                path: entry_label(&label, file),
                                reason,
                            }
                            .fail();
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Joins entry names into the `/`-separated label used in messages.
pub(crate) fn entry_label(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn name_problem(name: &str, allow_nested: bool) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name is empty");
    }
    if name.contains('\0') {
        return Some("name contains a NUL byte");
    }

    let mut segments = 0;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => segments += 1,
            Component::RootDir | Component::Prefix(_) => return Some("name must be relative"),
            Component::ParentDir => return Some("name must not contain '..'"),
            Component::CurDir => return Some("name must not contain '.'"),
        }
    }

    if !allow_nested && segments > 1 {
        return Some("file name must be a single path segment");
    }
    None
}

#[derive(Debug, Snafu)]
pub enum BlueprintValidationError {
    #[snafu(display("Invalid folder name '{}': {}", path, reason))]
    InvalidDirectoryName { path: String, reason: &'static str },
    #[snafu(display("Invalid file name '{}': {}", path, reason))]
    InvalidFileName { path: String, reason: &'static str },
}
