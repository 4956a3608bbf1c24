pub mod cancel;
pub mod configuration;
pub mod cron;
pub mod environment;
pub mod error;
pub mod policy;
pub mod report;
pub mod scripts;

pub use cancel::CancellationToken;
pub use configuration::{JobConfig, LoadedConfig, LockMode};
pub use cron::CronSchedule;
pub use environment::{EnvPlan, ExecutionEnvironment};
pub use error::AppError;
pub use policy::{Condition, Disposition, Step, disposition};
pub use report::{RunReport, RunStatus, ScriptRecord, UnitOutcome};
pub use scripts::{ScriptSet, script_name};
