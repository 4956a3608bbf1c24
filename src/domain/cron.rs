//! Crontab entry rendering.

use std::path::Path;

use crate::domain::AppError;

const SHORTCUTS: &[&str] =
    &["@reboot", "@yearly", "@annually", "@monthly", "@weekly", "@daily", "@midnight", "@hourly"];

const NAMES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec", "sun",
    "mon", "tue", "wed", "thu", "fri", "sat",
];

/// A validated cron schedule expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule(String);

impl CronSchedule {
    pub fn parse(expr: &str) -> Result<Self, AppError> {
        let expr = expr.trim();
        if expr.starts_with('@') {
            if SHORTCUTS.contains(&expr) {
                return Ok(Self(expr.to_string()));
            }
            return Err(AppError::Validation(format!(
                "Unknown cron shortcut '{}'. Expected one of: {}",
                expr,
                SHORTCUTS.join(", ")
            )));
        }

        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(AppError::Validation(format!(
                "Cron expression '{}' must have 5 fields (minute hour day month weekday), found {}",
                expr,
                fields.len()
            )));
        }
        for field in &fields {
            if !is_valid_field(field) {
                return Err(AppError::Validation(format!(
                    "Invalid cron field '{}' in '{}'",
                    field, expr
                )));
            }
        }
        Ok(Self(fields.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Crontab line invoking `exe run` with output appended to `log_file`.
    pub fn crontab_line(&self, exe: &Path, config: &Path, log_file: &Path) -> String {
        format!(
            "{} {} run --config {} >> {} 2>&1",
            self.0,
            shell_quote(&exe.to_string_lossy()),
            shell_quote(&config.to_string_lossy()),
            shell_quote(&log_file.to_string_lossy())
        )
    }
}

fn is_valid_field(field: &str) -> bool {
    field.split(',').all(|part| {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (part, None),
        };
        if step.is_some_and(|s| s.is_empty() || !s.chars().all(|c| c.is_ascii_digit())) {
            return false;
        }
        if range == "*" {
            return true;
        }
        let bounds: Vec<&str> = range.split('-').collect();
        bounds.len() <= 2 && bounds.iter().all(|b| is_valid_atom(b))
    })
}

fn is_valid_atom(atom: &str) -> bool {
    if atom.is_empty() {
        return false;
    }
    let lower = atom.to_ascii_lowercase();
    atom.chars().all(|c| c.is_ascii_digit()) || NAMES.contains(&lower.as_str())
}

/// Quote for `/bin/sh` when the value holds anything beyond a safe set.
fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+' | ':'));
    if safe { value.to_string() } else { format!("'{}'", value.replace('\'', r"'\''")) }
}
