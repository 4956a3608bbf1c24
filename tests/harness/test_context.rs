//! Shared testing harness for `scrapesync` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git_repository::{clone, commit_all, configure_user, git, init_bare_repo};

/// Config used by default: shell scripts run by `sh`, so no Python is needed.
pub(crate) const DEFAULT_CONFIG: &str = r#"[job]
workdir = "work"
script_extension = "sh"
script_timeout_secs = 30

[environment]
interpreter = "sh"
"#;

/// Isolated environment: a bare remote, a clone acting as the working
/// directory, and a config file beside (not inside) the clone.
pub(crate) struct TestContext {
    root: TempDir,
    remote: PathBuf,
    work_dir: PathBuf,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let remote = root.path().join("remote.git");
        init_bare_repo(&remote);

        let seed = root.path().join("seed");
        fs::create_dir_all(&seed).unwrap();
        git(&seed, &["init", "--quiet", "--initial-branch=main"]);
        configure_user(&seed);
        fs::write(seed.join("README.md"), "# scrapers\n").unwrap();
        commit_all(&seed, "Initial commit");
        git(&seed, &["push", "--quiet", &remote.to_string_lossy(), "main"]);
        fs::remove_dir_all(&seed).unwrap();

        let work_dir = root.path().join("work");
        clone(&remote, &work_dir);

        let ctx = Self { root, remote, work_dir };
        ctx.write_config(DEFAULT_CONFIG);
        ctx
    }

    /// Directory holding the config file; CLI invocations run here.
    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn remote(&self) -> &Path {
        &self.remote
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.root().join("scrapesync.toml")
    }

    pub(crate) fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Build a command for invoking the compiled `scrapesync` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("scrapesync").expect("Failed to locate scrapesync binary");
        cmd.current_dir(self.root())
            .env("HOME", self.root())
            .env_remove("SCRAPESYNC_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a script into the working directory without committing it.
    pub(crate) fn write_script(&self, name: &str, body: &str) {
        fs::write(self.work_dir.join(name), body).expect("Failed to write script");
    }

    /// Commit everything in the working directory and push it to the remote.
    pub(crate) fn publish_work(&self, message: &str) {
        commit_all(&self.work_dir, message);
        git(&self.work_dir, &["push", "--quiet", "origin", "main"]);
    }

    /// Commit a file from a second clone, so the working directory is behind.
    pub(crate) fn push_from_elsewhere(&self, name: &str, content: &str) {
        let other = self.root().join("other");
        if !other.exists() {
            clone(&self.remote, &other);
        } else {
            git(&other, &["pull", "--quiet", "--no-rebase", "origin", "main"]);
        }
        fs::write(other.join(name), content).unwrap();
        commit_all(&other, &format!("Add {}", name));
        git(&other, &["push", "--quiet", "origin", "main"]);
    }

    pub(crate) fn remote_commit_count(&self) -> usize {
        git(&self.remote, &["rev-list", "--count", "main"]).parse().expect("numeric count")
    }

    pub(crate) fn remote_head_subject(&self) -> String {
        git(&self.remote, &["log", "-1", "--format=%s", "main"])
    }

    /// Paths changed by the remote's newest commit, sorted.
    pub(crate) fn remote_head_files(&self) -> Vec<String> {
        let out = git(&self.remote, &["show", "--name-only", "--format=", "main"]);
        let mut files: Vec<String> = out.lines().filter(|l| !l.is_empty()).map(String::from).collect();
        files.sort();
        files
    }

    pub(crate) fn lock_path(&self) -> PathBuf {
        self.work_dir.join(".git").join("scrapesync.lock")
    }
}
