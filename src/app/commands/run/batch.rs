use std::time::Instant;

use crate::domain::{
    CancellationToken, Condition, RunReport, ScriptRecord, ScriptSet, Step, UnitOutcome, script_name,
};
use crate::ports::ScriptRunner;

use super::{Halt, raise};

/// Run every script in the snapshot, one at a time.
///
/// Script failures are recorded and the batch moves on. Once cancelled, the
/// remaining scripts are recorded as skipped.
pub(super) fn execute_all(
    runner: &impl ScriptRunner,
    scripts: &ScriptSet,
    cancel: &CancellationToken,
    report: &mut RunReport,
) -> Result<(), Halt> {
    for script in scripts.iter() {
        let name = script_name(script);

        if cancel.is_cancelled() {
            report.scripts.push(ScriptRecord { name, outcome: UnitOutcome::Skipped, duration_ms: 0 });
            continue;
        }

        tracing::info!(step = %Step::Execute, script = %name, "running script");
        let started = Instant::now();
        let outcome = runner
            .run(script, cancel)
            .unwrap_or_else(|e| UnitOutcome::SpawnFailed { reason: e.to_string() });
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &outcome {
            UnitOutcome::Succeeded => {
                tracing::info!(step = %Step::Execute, script = %name, duration_ms, "script succeeded");
            }
            UnitOutcome::TimedOut { .. } => {
                raise(Condition::ScriptTimedOut, format!("script {name} {}", outcome.describe()))?;
            }
            UnitOutcome::Failed { .. } | UnitOutcome::SpawnFailed { .. } => {
                raise(Condition::ScriptFailed, format!("script {name} {}", outcome.describe()))?;
            }
            UnitOutcome::Cancelled | UnitOutcome::Skipped => {
                tracing::warn!(step = %Step::Execute, script = %name, "script {}", outcome.describe());
            }
        }

        report.scripts.push(ScriptRecord { name, outcome, duration_ms });
    }
    Ok(())
}
