use std::path::Path;

use crate::domain::configuration::{CONFIG_FILE, resolve_path};
use crate::domain::{AppError, CronSchedule, LoadedConfig};

/// Render the crontab entry that runs `exe` on the configured schedule.
///
/// The entry names the config file by absolute path, so a config file must
/// exist; built-in defaults cannot be scheduled.
pub fn execute(loaded: &LoadedConfig, exe: &Path) -> Result<String, AppError> {
    let schedule = CronSchedule::parse(&loaded.config.schedule.cron)?;
    let config = loaded.source.as_deref().ok_or_else(|| {
        AppError::ConfigMissing(format!(
            "{} (run `scrapesync init` first)",
            loaded.base_dir.join(CONFIG_FILE).display()
        ))
    })?;
    let log_file = resolve_path(&loaded.base_dir, &loaded.config.schedule.log_file);
    Ok(schedule.crontab_line(exe, config, &log_file))
}
