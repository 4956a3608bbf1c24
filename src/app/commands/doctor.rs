//! Doctor command implementation.
//!
//! Checks that the prepared environment can host an unattended run. Every
//! check runs even when an earlier one fails.

use std::ffi::OsStr;

use crate::adapters::{LOCK_FILE, RunLock};
use crate::domain::configuration::resolve_path;
use crate::domain::{CronSchedule, ExecutionEnvironment, LoadedConfig};
use crate::ports::GitPort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

impl DoctorCheck {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, ok: true, detail: detail.into() }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, ok: false, detail: detail.into() }
    }
}

#[derive(Debug, Clone)]
pub struct DoctorOutcome {
    pub checks: Vec<DoctorCheck>,
    pub exit_code: i32,
}

impl DoctorOutcome {
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.ok).count()
    }
}

pub fn execute(
    loaded: &LoadedConfig,
    git: &impl GitPort,
    inherited_path: Option<&OsStr>,
) -> DoctorOutcome {
    let job = &loaded.config.job;
    let environment = ExecutionEnvironment::from_config(&loaded.config.environment, &loaded.base_dir);
    let mut checks = Vec::new();

    checks.push(match &loaded.source {
        Some(path) => DoctorCheck::pass("config", path.display().to_string()),
        None => DoctorCheck::pass("config", "no config file; using built-in defaults"),
    });

    let workdir = resolve_path(&loaded.base_dir, &job.workdir);
    let git_dir = match git.git_dir() {
        Ok(dir) => {
            checks.push(DoctorCheck::pass("repository", workdir.display().to_string()));
            Some(dir)
        }
        Err(e) => {
            checks.push(DoctorCheck::fail("repository", e.to_string()));
            None
        }
    };

    if git_dir.is_some() {
        checks.push(match git.remote_url(&job.remote) {
            Ok(Some(url)) => DoctorCheck::pass("remote", format!("{} -> {}", job.remote, url)),
            Ok(None) => DoctorCheck::fail("remote", format!("remote '{}' is not configured", job.remote)),
            Err(e) => DoctorCheck::fail("remote", e.to_string()),
        });
    } else {
        checks.push(DoctorCheck::fail("remote", "skipped: not a git repository"));
    }

    checks.push(match environment.locate_interpreter(inherited_path) {
        Some(path) => DoctorCheck::pass("interpreter", path.display().to_string()),
        None => DoctorCheck::fail(
            "interpreter",
            format!("'{}' not found", environment.program().display()),
        ),
    });

    if let Some(venv) = environment.venv() {
        checks.push(if venv.is_dir() {
            DoctorCheck::pass("venv", venv.display().to_string())
        } else {
            DoctorCheck::fail("venv", format!("{} does not exist", venv.display()))
        });
    }

    if let Some(dir) = &git_dir {
        let lock_path = dir.join(LOCK_FILE);
        checks.push(match RunLock::is_held(&lock_path) {
            Ok(false) => DoctorCheck::pass("lock", "free"),
            Ok(true) => DoctorCheck::fail("lock", format!("held: {}", lock_path.display())),
            Err(e) => DoctorCheck::fail("lock", e.to_string()),
        });
    }

    checks.push(match CronSchedule::parse(&loaded.config.schedule.cron) {
        Ok(schedule) => DoctorCheck::pass("schedule", schedule.as_str()),
        Err(e) => DoctorCheck::fail("schedule", e.to_string()),
    });

    let exit_code = if checks.iter().all(|c| c.ok) { 0 } else { 1 };
    DoctorOutcome { checks, exit_code }
}
