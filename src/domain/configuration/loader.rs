//! Job configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::configuration::JobConfig;

/// Default config file name looked up in the current directory.
pub const CONFIG_FILE: &str = "scrapesync.toml";

/// A parsed configuration plus the location it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: JobConfig,
    /// File the config was read from; `None` when built-in defaults apply.
    pub source: Option<PathBuf>,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

/// Load the job configuration.
///
/// An explicitly named file must exist. Without one, `scrapesync.toml` in `cwd`
/// is used when present, otherwise built-in defaults rooted at `cwd`.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            let path = if path.is_absolute() { path.to_path_buf() } else { cwd.join(path) };
            if !path.is_file() {
                return Err(AppError::ConfigMissing(path.display().to_string()));
            }
            path
        }
        None => {
            let candidate = cwd.join(CONFIG_FILE);
            if !candidate.is_file() {
                let config = JobConfig::default();
                config.validate()?;
                return Ok(LoadedConfig { config, source: None, base_dir: cwd.to_path_buf() });
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)?;
    let config = parse_config_content(&content)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
    Ok(LoadedConfig { config, source: Some(path), base_dir })
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<JobConfig, AppError> {
    let config: JobConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
