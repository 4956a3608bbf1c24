use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::domain::{AppError, CancellationToken, UnitOutcome, script_name};
use crate::ports::ScriptRunner;

type SideEffect = Box<dyn Fn(&str) + Send + Sync>;

/// Runner returning canned outcomes per script name; unknown scripts succeed.
#[derive(Default)]
pub struct ScriptedRunner {
    outcomes: HashMap<String, UnitOutcome>,
    cancel_on: Option<String>,
    side_effect: Option<SideEffect>,
    pub ran: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, name: &str, outcome: UnitOutcome) -> Self {
        self.outcomes.insert(name.to_string(), outcome);
        self
    }

    /// Cancel the run while `name` is executing.
    pub fn cancel_on(mut self, name: &str) -> Self {
        self.cancel_on = Some(name.to_string());
        self
    }

    /// Called with each script name as it runs.
    pub fn on_run(mut self, effect: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.side_effect = Some(Box::new(effect));
        self
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
}

impl ScriptRunner for ScriptedRunner {
    fn run(&self, script: &Path, cancel: &CancellationToken) -> Result<UnitOutcome, AppError> {
        let name = script_name(script);
        self.ran.lock().unwrap().push(name.clone());
        if let Some(effect) = &self.side_effect {
            effect(&name);
        }
        if self.cancel_on.as_deref() == Some(name.as_str()) {
            cancel.cancel();
            return Ok(UnitOutcome::Cancelled);
        }
        Ok(self.outcomes.get(&name).cloned().unwrap_or(UnitOutcome::Succeeded))
    }
}
