use std::path::{Component, Path, PathBuf};

/// Renders paths for messages as absolute as can be determined.
///
/// Existing paths are canonicalized. Paths that do not exist yet (the usual
/// case before a folder gets created) are made absolute against the current
/// directory and normalized lexically instead.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        let path = self.as_ref();
        path.canonicalize()
            .unwrap_or_else(|_| {
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                normalize_path(&absolute)
            })
            .display()
            .to_string()
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut components, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(components.last(), Some(Component::Normal(_))) {
                        components.pop();
                    }
                }
                _ => components.push(component),
            }
            components
        })
        .iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case("/a/b/../c/./d", "/a/c/d")]
    #[case("/a/../..", "/")]
    #[case("/a/b/", "/a/b")]
    fn normalizes_lexically(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn missing_paths_are_made_absolute() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("not-yet").join("..").join("later");

        let displayed = missing.best_effort_path_display();
        assert!(Path::new(&displayed).is_absolute());
        assert!(displayed.ends_with("later"));
        assert!(!displayed.contains("not-yet"));
    }

    #[test]
    fn existing_paths_are_canonicalized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let canonical = temp_dir.path().canonicalize().unwrap();

        assert_eq!(
            temp_dir.path().best_effort_path_display(),
            canonical.display().to_string()
        );
    }
}
