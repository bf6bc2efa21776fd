use std::{
    fmt,
    path::{Path, PathBuf},
};

use snafu::Snafu;
use walkdir::{DirEntry, FilterEntry, WalkDir};

const INDENT: &str = "    ";

/// A folder found while walking a tree, `depth` 0 being the walk root.
///
/// Renders as its name indented by four spaces per level, and every folder,
/// at any depth, ends with a trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub depth: usize,
    pub name: String,
    pub path: PathBuf,
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/", INDENT.repeat(self.depth), self.name)
    }
}

type DirectoriesOnly = FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
}

/// Lazy pre-order walk over the folders below a root.
///
/// Siblings are visited in file name order, so walking an unchanged tree
/// again yields the same sequence. Files and symlinks are skipped.
pub struct TreeWalk {
    root: PathBuf,
    inner: DirectoriesOnly,
}

impl TreeWalk {
    pub fn new(root: &Path) -> Self {
        let inner = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_directory as fn(&DirEntry) -> bool);

        Self {
            root: root.to_path_buf(),
            inner,
        }
    }
}

impl Iterator for TreeWalk {
    type Item = Result<TreeEntry, TreeWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.inner.next()? {
            Ok(entry) => Ok(TreeEntry {
                depth: entry.depth(),
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            }),
            Err(source) => Err(TreeWalkError {
                root: self.root.clone(),
                source,
            }),
        };
        Some(item)
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to walk the folder tree at {}", root.display()))]
pub struct TreeWalkError {
    root: PathBuf,
    source: walkdir::Error,
}
