//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together config loading,
//! adapter construction and command execution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::{FilesystemWorkingTree, GitCommandAdapter, LOCK_FILE, ProcessScriptRunner, RunLock};
use crate::app::{
    AppContext,
    commands::{cron, doctor, init, run},
};
use crate::domain::configuration::{load_config, resolve_path};
use crate::domain::{Condition, ExecutionEnvironment, LoadedConfig, LockMode};
use crate::ports::GitPort;

pub use crate::app::commands::doctor::{DoctorCheck, DoctorOutcome};
pub use crate::app::commands::run::RunOptions;
pub use crate::domain::{AppError, CancellationToken, RunReport, RunStatus};

/// Command-line overrides applied on top of the `[job]` section.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Working directory, relative to the current directory.
    pub workdir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    /// Block on a held lock instead of skipping the run.
    pub wait: bool,
}

/// Resolve the working directory and check that it exists.
fn resolve_workdir(loaded: &LoadedConfig, cwd: &Path, overrides: &RunOverrides) -> Result<PathBuf, AppError> {
    let workdir = match &overrides.workdir {
        Some(dir) => resolve_path(cwd, dir),
        None => resolve_path(&loaded.base_dir, &loaded.config.job.workdir),
    };
    if !workdir.is_dir() {
        return Err(AppError::config_error(format!(
            "Working directory {} does not exist",
            workdir.display()
        )));
    }
    Ok(workdir)
}

/// `path` relative to `workdir`, when it lies inside it.
fn path_within(workdir: &Path, path: &Path) -> Option<PathBuf> {
    let workdir = workdir.canonicalize().ok()?;
    let parent = path.parent()?.canonicalize().ok()?;
    let relative = parent.strip_prefix(&workdir).ok()?;
    Some(relative.join(path.file_name()?))
}

// =============================================================================
// Run Command API
// =============================================================================

/// Run one sync-and-run cycle from the current directory.
pub fn run(
    config: Option<&Path>,
    overrides: &RunOverrides,
    cancel: &CancellationToken,
) -> Result<RunReport, AppError> {
    run_at(std::env::current_dir()?, config, overrides, cancel)
}

/// Run one sync-and-run cycle with `cwd` as the current directory.
///
/// Errors cover setup only (config, working directory, lock file). Once the
/// lock is held, every outcome is reported through the returned [`RunReport`].
pub fn run_at(
    cwd: impl Into<PathBuf>,
    config: Option<&Path>,
    overrides: &RunOverrides,
    cancel: &CancellationToken,
) -> Result<RunReport, AppError> {
    let cwd = cwd.into();
    let loaded = load_config(config, &cwd)?;

    let mut job = loaded.config.job.clone();
    if let Some(secs) = overrides.timeout_secs {
        job.script_timeout_secs = secs;
    }
    if overrides.wait {
        job.lock = LockMode::Wait;
    }
    job.validate()?;

    let workdir = resolve_workdir(&loaded, &cwd, overrides)?;
    let environment = ExecutionEnvironment::from_config(&loaded.config.environment, &loaded.base_dir);
    let env_plan = environment.plan(std::env::var_os("PATH").as_deref())?;
    let git_envs: Vec<(String, OsString)> =
        env_plan.set.iter().filter(|(key, _)| key == "HOME" || key == "PATH").cloned().collect();

    let git = GitCommandAdapter::new(workdir.clone()).with_envs(git_envs);
    let lock_path = git.git_dir()?.join(LOCK_FILE);
    let Some(lock) = RunLock::acquire(&lock_path, job.lock)? else {
        tracing::warn!(
            step = %Condition::LockBusy.step(),
            lock = %lock_path.display(),
            "another run is in progress; skipping"
        );
        return Ok(RunReport::busy(&lock_path.display().to_string()));
    };
    tracing::info!(workdir = %workdir.display(), lock = %lock.path().display(), "starting run");

    let log_file = resolve_path(&loaded.base_dir, &loaded.config.schedule.log_file);
    if let Some(relative) = path_within(&workdir, &log_file) {
        match git.exclude(&relative) {
            Ok(true) => tracing::info!(log = %log_file.display(), "job log excluded from staging"),
            Ok(false) => {}
            Err(e) => tracing::warn!(log = %log_file.display(), error = %e, "cannot exclude job log"),
        }
    }

    let runner = ProcessScriptRunner::new(
        environment.program(),
        workdir.clone(),
        env_plan,
        Duration::from_secs(job.script_timeout_secs),
    );
    let ctx = AppContext::new(git, FilesystemWorkingTree::new(workdir), runner);
    let report = run::execute(&ctx, &RunOptions::from_config(&job), cancel);
    drop(lock);
    Ok(report)
}

// =============================================================================
// Provisioning API
// =============================================================================

/// Validate the prepared environment from the current directory.
pub fn doctor(config: Option<&Path>) -> Result<DoctorOutcome, AppError> {
    doctor_at(std::env::current_dir()?, config)
}

/// Validate the prepared environment with `cwd` as the current directory.
pub fn doctor_at(cwd: impl Into<PathBuf>, config: Option<&Path>) -> Result<DoctorOutcome, AppError> {
    let cwd = cwd.into();
    let loaded = load_config(config, &cwd)?;
    let workdir = resolve_workdir(&loaded, &cwd, &RunOverrides::default())?;
    let git = GitCommandAdapter::new(workdir);
    Ok(doctor::execute(&loaded, &git, std::env::var_os("PATH").as_deref()))
}

/// Render the crontab entry for this binary.
pub fn cron_line(config: Option<&Path>) -> Result<String, AppError> {
    cron_line_at(std::env::current_dir()?, config, &std::env::current_exe()?)
}

/// Render the crontab entry for `exe` with `cwd` as the current directory.
pub fn cron_line_at(cwd: impl Into<PathBuf>, config: Option<&Path>, exe: &Path) -> Result<String, AppError> {
    let cwd = cwd.into();
    let loaded = load_config(config, &cwd)?;
    cron::execute(&loaded, exe)
}

/// Write a starter config into `dir`, relative to the current directory.
pub fn init(dir: &Path, force: bool) -> Result<PathBuf, AppError> {
    init_at(std::env::current_dir()?.join(dir), force)
}

/// Write a starter config into `dir`.
pub fn init_at(dir: impl Into<PathBuf>, force: bool) -> Result<PathBuf, AppError> {
    init::execute(&dir.into(), force)
}
