//! Run outcome model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::policy::Step;

/// Result of executing one scraper script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum UnitOutcome {
    Succeeded,
    /// Exited non-zero; `code` is `None` when killed by a signal.
    Failed { code: Option<i32> },
    TimedOut { after_secs: u64 },
    SpawnFailed { reason: String },
    /// Terminated because the run was cancelled.
    Cancelled,
    /// Never started because the run was cancelled earlier.
    Skipped,
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UnitOutcome::Succeeded)
    }

    /// Whether this outcome counts against the run.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            UnitOutcome::Failed { .. } | UnitOutcome::TimedOut { .. } | UnitOutcome::SpawnFailed { .. }
        )
    }

    pub fn describe(&self) -> String {
        match self {
            UnitOutcome::Succeeded => "succeeded".to_string(),
            UnitOutcome::Failed { code: Some(code) } => format!("failed with exit code {code}"),
            UnitOutcome::Failed { code: None } => "failed (terminated by signal)".to_string(),
            UnitOutcome::TimedOut { after_secs } => format!("timed out after {after_secs}s"),
            UnitOutcome::SpawnFailed { reason } => format!("could not be started: {reason}"),
            UnitOutcome::Cancelled => "cancelled".to_string(),
            UnitOutcome::Skipped => "skipped".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptRecord {
    pub name: String,
    pub outcome: UnitOutcome,
    pub duration_ms: u64,
}

/// Final status of a run. Each status has a distinct process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Pull, every script, and publish succeeded.
    Succeeded,
    /// Publish succeeded but at least one script failed.
    ScriptsFailed,
    /// A fatal step failed.
    Aborted,
    /// Another run holds the lock; nothing was touched.
    Busy,
    /// Cancelled by signal; publish skipped.
    Cancelled,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Succeeded => 0,
            RunStatus::Aborted => 2,
            RunStatus::ScriptsFailed => 3,
            RunStatus::Busy => 75,
            RunStatus::Cancelled => 130,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    /// Step that stopped the run, if any.
    pub failed_step: Option<Step>,
    pub error: Option<String>,
    pub branch: Option<String>,
    pub scripts: Vec<ScriptRecord>,
    /// Paths included in this run's commit.
    pub committed_files: Vec<String>,
    pub commit: Option<String>,
    pub pushed: bool,
}

impl RunReport {
    pub(crate) fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            status: RunStatus::Succeeded,
            failed_step: None,
            error: None,
            branch: None,
            scripts: Vec::new(),
            committed_files: Vec::new(),
            commit: None,
            pushed: false,
        }
    }

    /// Report for a run that found the lock held.
    pub fn busy(lock_path: &str) -> Self {
        let now = Utc::now();
        let mut report = Self::new(now);
        report.status = RunStatus::Busy;
        report.failed_step = Some(Step::Lock);
        report.error = Some(format!("another run holds {lock_path}"));
        report
    }

    pub fn failed_scripts(&self) -> impl Iterator<Item = &ScriptRecord> {
        self.scripts.iter().filter(|s| s.outcome.is_failure())
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}
