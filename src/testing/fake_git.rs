use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::GitPort;

/// In-memory git double.
///
/// Files written by scripts are modeled as `pending` paths; `stage_all` moves
/// them to the index, `commit` records a commit, `push` clears the unpushed
/// count.
#[derive(Default)]
pub struct FakeGit {
    pub calls: Mutex<Vec<String>>,
    pub pending: Arc<Mutex<Vec<String>>>,
    pub staged: Mutex<Vec<String>>,
    pub commits: Mutex<Vec<(String, Vec<String>)>>,
    pub unpushed: Mutex<usize>,
    pub fail_pull: bool,
    pub fail_push: bool,
    pub fail_commit: bool,
    pub branch: String,
}

impl FakeGit {
    pub fn new() -> Self {
        Self { branch: "main".to_string(), ..Default::default() }
    }

    /// Shared handle scripts can use to "write" files.
    pub fn pending_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.pending)
    }

    pub fn add_pending(&self, path: &str) {
        self.pending.lock().unwrap().push(path.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.lock().unwrap().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitPort for FakeGit {
    fn git_dir(&self) -> Result<PathBuf, AppError> {
        Ok(PathBuf::from("/fake/.git"))
    }

    fn get_current_branch(&self) -> Result<String, AppError> {
        Ok(self.branch.clone())
    }

    fn get_head_sha(&self) -> Result<Option<String>, AppError> {
        let count = self.commit_count();
        Ok(Some(format!("{:040}", count)))
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, AppError> {
        Ok((remote == "origin").then(|| "file:///fake/remote.git".to_string()))
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<(), AppError> {
        self.record(format!("pull {remote} {branch}"));
        if self.fail_pull {
            return Err(AppError::git("git pull", "fatal: unable to access remote"));
        }
        Ok(())
    }

    fn abort_merge(&self) -> Result<(), AppError> {
        self.record("abort_merge".to_string());
        Ok(())
    }

    fn stage_all(&self) -> Result<(), AppError> {
        self.record("stage_all".to_string());
        let mut pending = self.pending.lock().unwrap();
        let mut staged = self.staged.lock().unwrap();
        for path in pending.drain(..) {
            if !staged.contains(&path) {
                staged.push(path);
            }
        }
        Ok(())
    }

    fn staged_paths(&self) -> Result<Vec<String>, AppError> {
        Ok(self.staged.lock().unwrap().clone())
    }

    fn commit(&self, message: &str) -> Result<String, AppError> {
        self.record(format!("commit {message}"));
        if self.fail_commit {
            return Err(AppError::git("git commit", "fatal: unable to write index"));
        }
        let files: Vec<String> = self.staged.lock().unwrap().drain(..).collect();
        self.commits.lock().unwrap().push((message.to_string(), files));
        *self.unpushed.lock().unwrap() += 1;
        Ok(self.get_head_sha()?.unwrap_or_default())
    }

    fn is_ahead_of_remote(&self, _remote: &str, _branch: &str) -> Result<bool, AppError> {
        Ok(*self.unpushed.lock().unwrap() > 0)
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), AppError> {
        self.record(format!("push {remote} {branch}"));
        if self.fail_push {
            return Err(AppError::git("git push", "! [rejected] main -> main (fetch first)"));
        }
        *self.unpushed.lock().unwrap() = 0;
        Ok(())
    }
}
