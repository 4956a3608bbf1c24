//! Execution environment for scraper scripts.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::configuration::{EnvironmentSection, resolve_path};

/// Interpreter plus the process environment scripts run under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionEnvironment {
    interpreter: String,
    venv: Option<PathBuf>,
    home: Option<PathBuf>,
    path: Option<String>,
}

/// Variables to set and remove on a child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvPlan {
    pub set: Vec<(String, OsString)>,
    pub remove: Vec<String>,
}

impl ExecutionEnvironment {
    pub fn from_config(section: &EnvironmentSection, base_dir: &Path) -> Self {
        Self {
            interpreter: section.interpreter.clone(),
            venv: section.venv.as_deref().map(|v| resolve_path(base_dir, v)),
            home: section.home.as_deref().map(|h| resolve_path(base_dir, h)),
            path: section.path.clone(),
        }
    }

    pub fn venv(&self) -> Option<&Path> {
        self.venv.as_deref()
    }

    fn venv_bin(&self) -> Option<PathBuf> {
        self.venv.as_ref().map(|v| v.join("bin"))
    }

    /// Program to spawn: a bare interpreter name resolves into the virtualenv
    /// when the virtualenv provides it.
    pub fn program(&self) -> PathBuf {
        let interpreter = Path::new(&self.interpreter);
        if interpreter.components().count() == 1
            && let Some(bin) = self.venv_bin()
        {
            let candidate = bin.join(interpreter);
            if candidate.is_file() {
                return candidate;
            }
        }
        interpreter.to_path_buf()
    }

    /// `PATH` scripts see: virtualenv `bin` first, then the configured or
    /// inherited search path.
    pub fn search_path(&self, inherited: Option<&OsStr>) -> Result<Option<OsString>, AppError> {
        let base: Vec<PathBuf> = match (&self.path, inherited) {
            (Some(fixed), _) => env::split_paths(fixed).collect(),
            (None, Some(inherited)) => env::split_paths(inherited).collect(),
            (None, None) => Vec::new(),
        };
        let mut entries = Vec::with_capacity(base.len() + 1);
        if let Some(bin) = self.venv_bin() {
            entries.push(bin);
        }
        entries.extend(base);
        if entries.is_empty() {
            return Ok(None);
        }
        env::join_paths(entries)
            .map(Some)
            .map_err(|e| AppError::config_error(format!("Invalid PATH entry: {e}")))
    }

    /// Variables to apply to each script process.
    pub fn plan(&self, inherited_path: Option<&OsStr>) -> Result<EnvPlan, AppError> {
        let mut plan = EnvPlan::default();
        if let Some(path) = self.search_path(inherited_path)? {
            plan.set.push(("PATH".to_string(), path));
        }
        if let Some(home) = &self.home {
            plan.set.push(("HOME".to_string(), home.clone().into_os_string()));
        }
        if let Some(venv) = &self.venv {
            plan.set.push(("VIRTUAL_ENV".to_string(), venv.clone().into_os_string()));
            plan.remove.push("PYTHONHOME".to_string());
        }
        Ok(plan)
    }

    /// Find the interpreter the way the child process would.
    pub fn locate_interpreter(&self, inherited_path: Option<&OsStr>) -> Option<PathBuf> {
        let program = self.program();
        if program.components().count() > 1 {
            return program.is_file().then_some(program);
        }
        let search = self.search_path(inherited_path).ok().flatten()?;
        env::split_paths(&search).map(|dir| dir.join(&program)).find(|p| p.is_file())
    }
}
