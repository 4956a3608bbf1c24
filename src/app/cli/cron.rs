use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_cron(config: Option<PathBuf>) -> Result<(), AppError> {
    let line = crate::app::api::cron_line(config.as_deref())?;
    println!("{}", line);
    Ok(())
}
