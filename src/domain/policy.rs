//! Per-step failure policy.
//!
//! Every condition the run pipeline can hit is mapped to exactly one
//! [`Disposition`]. The pipeline never decides ad hoc whether to stop; it asks
//! [`disposition`].

use std::fmt;

use serde::Serialize;

/// Pipeline steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Lock,
    Pull,
    Discover,
    Execute,
    Stage,
    Commit,
    Push,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Step::Lock => "lock",
            Step::Pull => "pull",
            Step::Discover => "discover",
            Step::Execute => "execute",
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Push => "push",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something that went other than planned during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    LockBusy,
    PullFailed,
    DiscoveryFailed,
    ScriptFailed,
    ScriptTimedOut,
    StageFailed,
    NothingToCommit,
    CommitFailed,
    NothingToPush,
    PushFailed,
}

impl Condition {
    /// Step the condition is raised in.
    pub fn step(self) -> Step {
        match self {
            Condition::LockBusy => Step::Lock,
            Condition::PullFailed => Step::Pull,
            Condition::DiscoveryFailed => Step::Discover,
            Condition::ScriptFailed | Condition::ScriptTimedOut => Step::Execute,
            Condition::StageFailed => Step::Stage,
            Condition::NothingToCommit | Condition::CommitFailed => Step::Commit,
            Condition::NothingToPush | Condition::PushFailed => Step::Push,
        }
    }
}

/// What the pipeline does after a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Stop the run; nothing further is attempted.
    Fatal,
    /// Record the failure and carry on with the next unit or step.
    Continue,
    /// Not a failure; carry on.
    Ignore,
}

/// The policy table.
pub fn disposition(condition: Condition) -> Disposition {
    match condition {
        Condition::LockBusy
        | Condition::PullFailed
        | Condition::DiscoveryFailed
        | Condition::StageFailed
        | Condition::CommitFailed
        | Condition::PushFailed => Disposition::Fatal,
        Condition::ScriptFailed | Condition::ScriptTimedOut => Disposition::Continue,
        Condition::NothingToCommit | Condition::NothingToPush => Disposition::Ignore,
    }
}
