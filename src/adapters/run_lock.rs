//! Exclusive per-checkout run lock.
//!
//! The lock is an OS advisory lock on `<git-dir>/scrapesync.lock`. The kernel
//! drops it when the holding process exits, so a crashed run never leaves a
//! stale lock behind. The file itself is left in place between runs.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::domain::{AppError, LockMode};

/// File name of the lock inside the git directory.
pub const LOCK_FILE: &str = "scrapesync.lock";

/// Held lock. Released on drop.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Acquire the lock at `path`.
    ///
    /// Returns `Ok(None)` in [`LockMode::Skip`] when another process holds it.
    pub fn acquire(path: &Path, mode: LockMode) -> Result<Option<Self>, AppError> {
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| lock_error(path, e))?;

        match mode {
            LockMode::Skip => match file.try_lock() {
                Ok(()) => {}
                Err(TryLockError::WouldBlock) => return Ok(None),
                Err(TryLockError::Error(e)) => return Err(lock_error(path, e)),
            },
            LockMode::Wait => {
                tracing::info!(lock = %path.display(), "waiting for run lock");
                file.lock().map_err(|e| lock_error(path, e))?;
            }
        }

        // Holder pid for whoever inspects a busy lock.
        file.set_len(0).map_err(|e| lock_error(path, e))?;
        file.seek(SeekFrom::Start(0)).map_err(|e| lock_error(path, e))?;
        writeln!(file, "{}", std::process::id()).map_err(|e| lock_error(path, e))?;

        tracing::debug!(lock = %path.display(), "run lock acquired");
        Ok(Some(Self { file, path: path.to_path_buf() }))
    }

    /// Whether some process currently holds the lock at `path`.
    pub fn is_held(path: &Path) -> Result<bool, AppError> {
        if !path.exists() {
            return Ok(false);
        }
        let file = File::open(path).map_err(|e| lock_error(path, e))?;
        match file.try_lock_shared() {
            Ok(()) => Ok(false),
            Err(TryLockError::WouldBlock) => Ok(true),
            Err(TryLockError::Error(e)) => Err(lock_error(path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to release run lock");
        } else {
            tracing::debug!(lock = %self.path.display(), "run lock released");
        }
    }
}

fn lock_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::LockError { path: path.display().to_string(), details: err.to_string() }
}
