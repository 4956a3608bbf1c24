//! Doctor command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_doctor(config: Option<PathBuf>) -> Result<i32, AppError> {
    let outcome = crate::app::api::doctor(config.as_deref())?;

    for check in &outcome.checks {
        let marker = if check.ok { "✅" } else { "❌" };
        println!("{} {:<12} {}", marker, check.name, check.detail);
    }

    let failures = outcome.failures();
    if failures == 0 {
        println!("All checks passed.");
    } else {
        eprintln!("Check failed: {} problem(s) found.", failures);
    }
    Ok(outcome.exit_code)
}
