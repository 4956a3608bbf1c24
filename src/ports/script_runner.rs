use std::path::Path;

use crate::domain::{AppError, CancellationToken, UnitOutcome};

/// Executes a single scraper script to completion.
pub trait ScriptRunner {
    /// Run `script`, honoring the runner's timeout and `cancel`.
    ///
    /// A script that runs and fails is an `Ok` outcome; `Err` is reserved for
    /// failures of the runner itself.
    fn run(&self, script: &Path, cancel: &CancellationToken) -> Result<UnitOutcome, AppError>;
}
