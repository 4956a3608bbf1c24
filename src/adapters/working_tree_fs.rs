use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::WorkingTree;

/// Filesystem-backed working tree.
#[derive(Debug, Clone)]
pub struct FilesystemWorkingTree {
    root: PathBuf,
}

impl FilesystemWorkingTree {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl WorkingTree for FilesystemWorkingTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn top_level_files(&self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            // Follows symlinks so a linked script still counts as a file.
            if !fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, "skipping non-UTF-8 file name");
                }
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_only_top_level_regular_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/inner.py"), "").unwrap();
        fs::create_dir_all(dir.path().join("dir.py")).unwrap();

        let tree = FilesystemWorkingTree::new(dir.path().to_path_buf());
        let mut names = tree.top_level_files().unwrap();
        names.sort();
        assert_eq!(names, vec!["a.py".to_string(), "notes.md".to_string()]);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let tree = FilesystemWorkingTree::new(dir.path().join("gone"));
        assert!(matches!(tree.top_level_files(), Err(AppError::Io(_))));
    }
}
