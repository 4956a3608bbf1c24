pub mod job_config;
pub mod loader;

pub use job_config::{
    EnvironmentSection, JobConfig, JobSection, LockMode, ScheduleSection, resolve_path,
};
pub use loader::{CONFIG_FILE, LoadedConfig, load_config, parse_config_content};
