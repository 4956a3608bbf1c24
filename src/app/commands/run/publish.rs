use chrono::{DateTime, Utc};

use crate::domain::{CancellationToken, Condition, RunReport, Step};
use crate::ports::GitPort;

use super::{Halt, RunOptions, checkpoint, halt, raise};

/// Stage, commit and push whatever the batch produced.
///
/// An unchanged working directory commits nothing. The push runs whenever
/// the branch is ahead of its remote-tracking ref, which also publishes a
/// commit left behind by an earlier failed push.
pub(super) fn publish(
    git: &impl GitPort,
    options: &RunOptions,
    branch: &str,
    cancel: &CancellationToken,
    report: &mut RunReport,
) -> Result<(), Halt> {
    tracing::info!(step = %Step::Stage, "staging changes");
    git.stage_all().map_err(|e| halt(Condition::StageFailed, format!("git add failed: {e}")))?;
    let staged = git
        .staged_paths()
        .map_err(|e| halt(Condition::StageFailed, format!("cannot list staged changes: {e}")))?;

    if staged.is_empty() {
        raise(Condition::NothingToCommit, "nothing to commit; working directory unchanged")?;
    } else {
        let message = render_commit_message(&options.commit_message, Utc::now());
        match git.commit(&message) {
            Ok(sha) => {
                tracing::info!(step = %Step::Commit, commit = %sha, files = staged.len(), "committed changes");
                report.commit = Some(sha);
                report.committed_files = staged;
            }
            Err(e) => raise(Condition::CommitFailed, format!("commit failed: {e}"))?,
        }
    }

    checkpoint(cancel, Step::Push)?;
    let ahead = git
        .is_ahead_of_remote(&options.remote, branch)
        .map_err(|e| halt(Condition::PushFailed, format!("cannot compare with remote: {e}")))?;
    if !ahead {
        return raise(Condition::NothingToPush, format!("{}/{} is up to date", options.remote, branch));
    }

    tracing::info!(step = %Step::Push, remote = %options.remote, branch, "pushing");
    match git.push(&options.remote, branch) {
        Ok(()) => {
            report.pushed = true;
            tracing::info!(step = %Step::Push, remote = %options.remote, branch, "push succeeded");
            Ok(())
        }
        Err(e) => raise(Condition::PushFailed, format!("push to {}/{} failed: {e}", options.remote, branch)),
    }
}

/// Expand `{date}` in the configured commit message.
pub(super) fn render_commit_message(template: &str, now: DateTime<Utc>) -> String {
    template.replace("{date}", &now.format("%Y-%m-%d %H:%M UTC").to_string())
}
