//! Run command implementation.

use std::path::PathBuf;

use crate::app::api::{self, RunOverrides};
use crate::domain::{AppError, CancellationToken, RunReport, RunStatus, UnitOutcome};

use super::signals;

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub workdir: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub wait: bool,
    pub json: bool,
}

pub fn run_job(args: RunArgs) -> Result<i32, AppError> {
    let cancel = CancellationToken::new();
    signals::install(&cancel)?;

    let overrides = RunOverrides { workdir: args.workdir, timeout_secs: args.timeout, wait: args.wait };
    let report = api::run(args.config.as_deref(), &overrides, &cancel)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(report.exit_code())
}

fn print_summary(report: &RunReport) {
    if report.status == RunStatus::Busy {
        println!("⏭️  Another run is in progress; skipped");
        return;
    }

    for script in &report.scripts {
        let marker = match &script.outcome {
            UnitOutcome::Succeeded => "✅",
            UnitOutcome::Cancelled | UnitOutcome::Skipped => "⏭️ ",
            _ => "❌",
        };
        println!("  {} {} {} ({} ms)", marker, script.name, script.outcome.describe(), script.duration_ms);
    }

    match &report.commit {
        Some(sha) => {
            let short = sha.get(..7).unwrap_or(sha);
            println!("Committed {} file(s) as {}", report.committed_files.len(), short);
        }
        None => println!("No changes to commit"),
    }
    if report.pushed {
        println!("Pushed to {}", report.branch.as_deref().unwrap_or("remote"));
    }

    let failed = report.failed_scripts().count();
    match report.status {
        RunStatus::Succeeded => println!("✅ Run succeeded ({} script(s))", report.scripts.len()),
        RunStatus::ScriptsFailed => {
            println!("⚠️  Run finished with {} failed script(s) of {}", failed, report.scripts.len())
        }
        RunStatus::Aborted => println!(
            "❌ Run aborted at {}: {}",
            report.failed_step.map(|s| s.label()).unwrap_or("unknown step"),
            report.error.as_deref().unwrap_or("unknown error")
        ),
        RunStatus::Cancelled => println!("⏹️  Run cancelled; nothing was published"),
        RunStatus::Busy => {}
    }
}
