use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::WorkingTree;

/// Working tree whose file list lives in memory.
pub struct MemoryTree {
    root: PathBuf,
    files: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MemoryTree {
    pub fn new(files: &[&str]) -> Self {
        Self {
            root: PathBuf::from("/work"),
            files: Arc::new(Mutex::new(files.iter().map(|f| f.to_string()).collect())),
            fail: false,
        }
    }

    /// Tree whose listing fails with a permission error.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::new(&[]) }
    }

    /// Shared handle for adding files while a run is in progress.
    pub fn files_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.files)
    }
}

impl WorkingTree for MemoryTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn top_level_files(&self) -> Result<Vec<String>, AppError> {
        if self.fail {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }
        Ok(self.files.lock().unwrap().clone())
    }
}
