//! Scraper script discovery.

use std::path::{Path, PathBuf};

/// Ordered snapshot of the scraper scripts present when discovery ran.
///
/// Later changes to the working directory do not affect the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSet {
    scripts: Vec<PathBuf>,
}

impl ScriptSet {
    /// Select scripts from the top-level file names of `root`.
    ///
    /// Keeps names whose extension equals `extension`, skips dotfiles, and
    /// orders by name so runs are reproducible.
    pub fn snapshot(root: &Path, file_names: &[String], extension: &str) -> Self {
        let mut names: Vec<&String> = file_names
            .iter()
            .filter(|name| !name.starts_with('.'))
            .filter(|name| Path::new(name.as_str()).extension().is_some_and(|ext| ext == extension))
            .collect();
        names.sort();
        names.dedup();
        Self { scripts: names.into_iter().map(|name| root.join(name)).collect() }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.scripts.iter().map(PathBuf::as_path)
    }
}

/// Display name of a script: its file name.
pub fn script_name(script: &Path) -> String {
    script
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| script.display().to_string())
}
