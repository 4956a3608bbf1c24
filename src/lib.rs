//! scrapesync: unattended sync-and-run job for a git checkout of scraper scripts.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AppError, DoctorCheck, DoctorOutcome, RunOverrides, RunReport, RunStatus, cron_line_at, doctor_at,
    init_at, run_at,
};
pub use domain::CancellationToken;
