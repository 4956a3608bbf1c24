use crate::domain::AppError;
use crate::ports::GitPort;
use git2::{ErrorCode, Repository, RepositoryState};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git adapter: network and index-mutating operations go through the `git`
/// CLI so user config and hooks apply; read-only queries use libgit2.
#[derive(Debug, Clone)]
pub struct GitCommandAdapter {
    root: PathBuf,
    envs: Vec<(String, OsString)>,
}

impl GitCommandAdapter {
    pub fn new(root: PathBuf) -> Self {
        Self { root, envs: Vec::new() }
    }

    /// Variables applied to every `git` invocation (fixed `HOME`/`PATH`).
    pub fn with_envs(mut self, envs: Vec<(String, OsString)>) -> Self {
        self.envs = envs;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Anchor `relative` in `info/exclude` so `git add -A` skips it.
    ///
    /// Returns `false` when the pattern is already listed. Paths that are
    /// already tracked stay tracked.
    pub fn exclude(&self, relative: &Path) -> Result<bool, AppError> {
        let pattern = format!("/{}", relative.to_string_lossy().replace('\\', "/"));
        let info_dir = self.git_dir()?.join("info");
        let exclude_file = info_dir.join("exclude");

        let mut content = match fs::read_to_string(&exclude_file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        if content.lines().any(|line| line.trim() == pattern) {
            return Ok(false);
        }

        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&pattern);
        content.push('\n');
        fs::create_dir_all(&info_dir)?;
        fs::write(&exclude_file, content)?;
        tracing::debug!(pattern = %pattern, file = %exclude_file.display(), "added exclude pattern");
        Ok(true)
    }

    fn repo(&self) -> Result<Repository, AppError> {
        Repository::open(&self.root).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                AppError::NotARepository(self.root.display().to_string())
            } else {
                AppError::git("git2::Repository::open", e)
            }
        })
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.root);
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        let command_line = format!("git {}", args.join(" "));
        tracing::debug!(command = %command_line, "running git");
        let output = command.output().map_err(|e| AppError::git(&command_line, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let details = match (stderr.is_empty(), stdout.is_empty()) {
                (false, _) => stderr,
                (true, false) => stdout,
                (true, true) => "Unknown error".to_string(),
            };
            return Err(AppError::git(command_line, details));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

impl GitPort for GitCommandAdapter {
    fn git_dir(&self) -> Result<PathBuf, AppError> {
        Ok(self.repo()?.path().to_path_buf())
    }

    fn get_current_branch(&self) -> Result<String, AppError> {
        let repo = self.repo()?;

        match repo.head() {
            Ok(head) => {
                if !head.is_branch() {
                    return Err(AppError::git(
                        "get_current_branch",
                        "HEAD is detached; set job.branch explicitly",
                    ));
                }
                let shorthand = head
                    .shorthand()
                    .ok_or_else(|| AppError::git("git2::Reference::shorthand", "HEAD has no shorthand"))?;
                Ok(shorthand.to_string())
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head_ref = repo
                    .find_reference("HEAD")
                    .map_err(|e| AppError::git("git2::Repository::find_reference(HEAD)", e))?;

                if let Some(target) = head_ref.symbolic_target() {
                    Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
                } else {
                    Err(AppError::git("get_current_branch", "HEAD is detached and unborn"))
                }
            }
            Err(e) => Err(AppError::git("git2::Repository::head", e)),
        }
    }

    fn get_head_sha(&self) -> Result<Option<String>, AppError> {
        let repo = self.repo()?;
        match repo.head() {
            Ok(head) => {
                let commit =
                    head.peel_to_commit().map_err(|e| AppError::git("git2::Reference::peel_to_commit", e))?;
                Ok(Some(commit.id().to_string()))
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(AppError::git("git2::Repository::head", e)),
        }
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, AppError> {
        let repo = self.repo()?;
        match repo.find_remote(remote) {
            Ok(found) => Ok(Some(found.url().unwrap_or_default().to_string())),
            Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => Ok(None),
            Err(e) => Err(AppError::git("git2::Repository::find_remote", e)),
        }
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<(), AppError> {
        self.run(&["pull", "--no-rebase", "--no-edit", remote, branch])?;
        Ok(())
    }

    fn abort_merge(&self) -> Result<(), AppError> {
        if self.repo()?.state() != RepositoryState::Merge {
            return Ok(());
        }
        self.run(&["merge", "--abort"])?;
        Ok(())
    }

    fn stage_all(&self) -> Result<(), AppError> {
        self.run(&["add", "-A"])?;
        Ok(())
    }

    fn staged_paths(&self) -> Result<Vec<String>, AppError> {
        let output = self.run(&["diff", "--cached", "--name-only", "-z"])?;
        Ok(output.split('\0').filter(|p| !p.is_empty()).map(str::to_string).collect())
    }

    fn commit(&self, message: &str) -> Result<String, AppError> {
        self.run(&["commit", "--quiet", "-m", message])?;
        self.get_head_sha()?
            .ok_or_else(|| AppError::git("git commit", "HEAD is unborn after commit"))
    }

    fn is_ahead_of_remote(&self, remote: &str, branch: &str) -> Result<bool, AppError> {
        let repo = self.repo()?;
        let head = match repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map_err(|e| AppError::git("git2::Reference::peel_to_commit", e))?
                .id(),
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(false),
            Err(e) => return Err(AppError::git("git2::Repository::head", e)),
        };

        let tracking = format!("refs/remotes/{}/{}", remote, branch);
        let upstream = match repo.find_reference(&tracking) {
            Ok(reference) => reference
                .peel_to_commit()
                .map_err(|e| AppError::git("git2::Reference::peel_to_commit", e))?
                .id(),
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(true),
            Err(e) => return Err(AppError::git("git2::Repository::find_reference", e)),
        };

        let (ahead, _behind) = repo
            .graph_ahead_behind(head, upstream)
            .map_err(|e| AppError::git("git2::Repository::graph_ahead_behind", e))?;
        Ok(ahead > 0)
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), AppError> {
        let refspec = format!("HEAD:refs/heads/{}", branch);
        self.run(&["push", remote, &refspec])?;
        Ok(())
    }
}
