//! Run command implementation: one sync-and-run cycle.
//!
//! Steps run in a fixed order (pull, discover, execute, stage, commit, push).
//! Every non-happy condition goes through [`raise`], which consults the policy
//! table to decide whether the cycle stops.

mod batch;
mod publish;

use std::fmt::Display;

use chrono::Utc;

use crate::app::AppContext;
use crate::domain::configuration::JobSection;
use crate::domain::{
    CancellationToken, Condition, Disposition, RunReport, RunStatus, ScriptSet, Step, disposition,
};
use crate::ports::{GitPort, ScriptRunner, WorkingTree};

/// Options for one run, taken from the `[job]` config section.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub remote: String,
    /// Branch to synchronize; `None` means the checked-out branch.
    pub branch: Option<String>,
    pub commit_message: String,
    pub script_extension: String,
}

impl RunOptions {
    pub fn from_config(job: &JobSection) -> Self {
        Self {
            remote: job.remote.clone(),
            branch: job.branch.clone(),
            commit_message: job.commit_message.clone(),
            script_extension: job.script_extension.clone(),
        }
    }
}

/// Why the pipeline stopped early.
#[derive(Debug)]
enum Halt {
    Fatal { condition: Condition, message: String },
    Cancelled { before: Step },
}

/// Apply the policy table to `condition`.
fn raise(condition: Condition, message: impl Display) -> Result<(), Halt> {
    let step = condition.step();
    match disposition(condition) {
        Disposition::Fatal => Err(halt(condition, message)),
        Disposition::Continue => {
            tracing::warn!(step = %step, condition = ?condition, "{message}");
            Ok(())
        }
        Disposition::Ignore => {
            tracing::info!(step = %step, condition = ?condition, "{message}");
            Ok(())
        }
    }
}

/// Stop the run on a condition the table marks fatal.
fn halt(condition: Condition, message: impl Display) -> Halt {
    debug_assert_eq!(disposition(condition), Disposition::Fatal);
    tracing::error!(step = %condition.step(), condition = ?condition, "{message}");
    Halt::Fatal { condition, message: message.to_string() }
}

fn checkpoint(cancel: &CancellationToken, before: Step) -> Result<(), Halt> {
    if cancel.is_cancelled() {
        tracing::warn!(step = %before, "run cancelled; skipping remaining steps");
        return Err(Halt::Cancelled { before });
    }
    Ok(())
}

/// Execute one cycle. The caller holds the run lock.
pub fn execute<G, T, R>(
    ctx: &AppContext<G, T, R>,
    options: &RunOptions,
    cancel: &CancellationToken,
) -> RunReport
where
    G: GitPort,
    T: WorkingTree,
    R: ScriptRunner,
{
    let mut report = RunReport::new(Utc::now());
    let result = pipeline(ctx, options, cancel, &mut report);

    report.status = match result {
        Ok(()) if report.failed_scripts().next().is_some() => RunStatus::ScriptsFailed,
        Ok(()) => RunStatus::Succeeded,
        Err(Halt::Fatal { condition, message }) => {
            report.failed_step = Some(condition.step());
            report.error = Some(message);
            RunStatus::Aborted
        }
        Err(Halt::Cancelled { before }) => {
            report.failed_step = Some(before);
            report.error = Some("cancelled".to_string());
            RunStatus::Cancelled
        }
    };
    report.finished_at = Utc::now();

    tracing::info!(
        status = ?report.status,
        scripts = report.scripts.len(),
        failed = report.failed_scripts().count(),
        commit = report.commit.as_deref().unwrap_or("-"),
        pushed = report.pushed,
        "run finished"
    );
    report
}

fn pipeline<G, T, R>(
    ctx: &AppContext<G, T, R>,
    options: &RunOptions,
    cancel: &CancellationToken,
    report: &mut RunReport,
) -> Result<(), Halt>
where
    G: GitPort,
    T: WorkingTree,
    R: ScriptRunner,
{
    checkpoint(cancel, Step::Pull)?;
    let branch = match &options.branch {
        Some(branch) => branch.clone(),
        None => ctx.git().get_current_branch().map_err(|e| {
            halt(Condition::PullFailed, format!("cannot determine branch to pull: {e}"))
        })?,
    };
    report.branch = Some(branch.clone());

    pull(ctx.git(), &options.remote, &branch)?;

    checkpoint(cancel, Step::Discover)?;
    let scripts = discover(ctx.tree(), &options.script_extension)?;

    batch::execute_all(ctx.runner(), &scripts, cancel, report)?;

    checkpoint(cancel, Step::Stage)?;
    publish::publish(ctx.git(), options, &branch, cancel, report)
}

fn pull(git: &impl GitPort, remote: &str, branch: &str) -> Result<(), Halt> {
    tracing::info!(step = %Step::Pull, remote, branch, "pulling latest state");
    if let Err(e) = git.pull(remote, branch) {
        if let Err(abort_err) = git.abort_merge() {
            tracing::warn!(step = %Step::Pull, error = %abort_err, "could not abort merge");
        }
        raise(Condition::PullFailed, format!("pull from {remote}/{branch} failed: {e}"))?;
    }
    Ok(())
}

fn discover(tree: &impl WorkingTree, extension: &str) -> Result<ScriptSet, Halt> {
    match tree.top_level_files() {
        Ok(files) => {
            let scripts = ScriptSet::snapshot(tree.root(), &files, extension);
            tracing::info!(step = %Step::Discover, count = scripts.len(), extension, "discovered scripts");
            Ok(scripts)
        }
        Err(e) => Err(halt(
            Condition::DiscoveryFailed,
            format!("cannot list {}: {e}", tree.root().display()),
        )),
    }
}
