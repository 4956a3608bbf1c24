use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::configuration::CONFIG_FILE;

const STARTER_CONFIG: &str = r#"# scrapesync configuration
#
# Relative paths resolve against the directory holding this file.

[job]
# Git checkout holding the scraper scripts.
workdir = "."
remote = "origin"
# branch = "main"                 # default: the checked-out branch
# {date} expands to the current UTC time.
commit_message = "Update scraped data ({date})"
script_extension = "py"
# Per-script wall-clock limit in seconds.
script_timeout_secs = 900
# "skip" exits when another run holds the lock; "wait" blocks until it is free.
lock = "skip"

[environment]
interpreter = "python3"
# venv = "venv"
# home = "/home/scraper"
# path = "/usr/local/bin:/usr/bin:/bin"

[schedule]
cron = "0 * * * *"
log_file = "scrapesync.log"
"#;

/// Write the starter config into `dir`. Returns the written path.
pub fn execute(dir: &Path, force: bool) -> Result<PathBuf, AppError> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        return Err(AppError::ConfigExists(path.display().to_string()));
    }
    fs::create_dir_all(dir)?;
    fs::write(&path, STARTER_CONFIG)?;
    tracing::debug!(path = %path.display(), "wrote starter config");
    Ok(path)
}
