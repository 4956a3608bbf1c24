//! Job configuration domain models.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Configuration for the sync-and-run job loaded from `scrapesync.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Repository synchronization and batch settings.
    #[serde(default)]
    pub job: JobSection,
    /// Execution environment for scraper scripts.
    #[serde(default)]
    pub environment: EnvironmentSection,
    /// Scheduler registration settings.
    #[serde(default)]
    pub schedule: ScheduleSection,
}

impl JobConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.job.validate()?;
        self.environment.validate()?;
        Ok(())
    }
}

/// Behavior when another run already holds the working-directory lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Exit immediately without touching the working directory.
    #[default]
    Skip,
    /// Block until the holder releases the lock.
    Wait,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSection {
    /// Working directory (git checkout), relative to the config file.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
    /// Remote to pull from and push to.
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Branch to synchronize. Defaults to the checked-out branch.
    #[serde(default)]
    pub branch: Option<String>,
    /// Commit message; `{date}` expands to the current UTC time.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// File extension identifying scraper scripts, without the dot.
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
    /// Per-script wall-clock limit in seconds.
    #[serde(default = "default_script_timeout_secs")]
    pub script_timeout_secs: u64,
    #[serde(default)]
    pub lock: LockMode,
}

impl Default for JobSection {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            remote: default_remote(),
            branch: None,
            commit_message: default_commit_message(),
            script_extension: default_script_extension(),
            script_timeout_secs: default_script_timeout_secs(),
            lock: LockMode::default(),
        }
    }
}

impl JobSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.remote.trim().is_empty() || self.remote.chars().any(char::is_whitespace) {
            return Err(AppError::config_error(format!(
                "job.remote must be a non-empty remote name, got '{}'",
                self.remote
            )));
        }
        if let Some(branch) = &self.branch
            && (branch.trim().is_empty() || branch.chars().any(char::is_whitespace))
        {
            return Err(AppError::config_error(format!(
                "job.branch must be a non-empty branch name, got '{}'",
                branch
            )));
        }
        if self.commit_message.trim().is_empty() {
            return Err(AppError::config_error("job.commit_message must not be empty"));
        }
        let ext = self.script_extension.as_str();
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(AppError::config_error(format!(
                "job.script_extension must be a bare extension like 'py', got '{}'",
                ext
            )));
        }
        if self.script_timeout_secs == 0 {
            return Err(AppError::config_error("job.script_timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

fn default_workdir() -> PathBuf {
    PathBuf::from(".")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    "Update scraped data ({date})".to_string()
}

fn default_script_extension() -> String {
    "py".to_string()
}

fn default_script_timeout_secs() -> u64 {
    900
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentSection {
    /// Interpreter used to run each script.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Prepared virtualenv directory, relative to the config file.
    #[serde(default)]
    pub venv: Option<PathBuf>,
    /// Fixed `HOME` for scripts.
    #[serde(default)]
    pub home: Option<PathBuf>,
    /// Fixed `PATH` for scripts.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for EnvironmentSection {
    fn default() -> Self {
        Self { interpreter: default_interpreter(), venv: None, home: None, path: None }
    }
}

impl EnvironmentSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.interpreter.trim().is_empty() {
            return Err(AppError::config_error("environment.interpreter must not be empty"));
        }
        if self.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(AppError::config_error("environment.path must not be empty when set"));
        }
        Ok(())
    }
}

fn default_interpreter() -> String {
    "python3".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Five-field cron expression or an `@` shortcut.
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Log file the crontab entry appends to, relative to the config file.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self { cron: default_cron(), log_file: default_log_file() }
    }
}

fn default_cron() -> String {
    "0 * * * *".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("scrapesync.log")
}

/// Resolve a configured path against the directory holding the config file.
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) }
}
