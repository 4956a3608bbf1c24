use std::path::PathBuf;

use crate::domain::AppError;

/// Git operations the sync-and-run job needs on its working copy.
pub trait GitPort {
    /// Path of the repository's `.git` directory.
    fn git_dir(&self) -> Result<PathBuf, AppError>;

    /// Get the current branch name.
    fn get_current_branch(&self) -> Result<String, AppError>;

    /// Get the current HEAD SHA, `None` on an unborn branch.
    fn get_head_sha(&self) -> Result<Option<String>, AppError>;

    /// URL of a configured remote, `None` if the remote does not exist.
    fn remote_url(&self, remote: &str) -> Result<Option<String>, AppError>;

    /// Fetch and merge `remote/branch` into the working copy.
    fn pull(&self, remote: &str, branch: &str) -> Result<(), AppError>;

    /// Abort an in-progress merge. Succeeds when no merge is in progress.
    fn abort_merge(&self) -> Result<(), AppError>;

    /// Stage every addition, modification and deletion.
    fn stage_all(&self) -> Result<(), AppError>;

    /// Paths currently staged relative to HEAD.
    fn staged_paths(&self) -> Result<Vec<String>, AppError>;

    /// Commit the index. Returns the new commit SHA.
    fn commit(&self, message: &str) -> Result<String, AppError>;

    /// Whether the local branch has commits `remote/branch` lacks.
    fn is_ahead_of_remote(&self, remote: &str, branch: &str) -> Result<bool, AppError>;

    /// Push `branch` to `remote`.
    fn push(&self, remote: &str, branch: &str) -> Result<(), AppError>;
}
