//! CLI Adapter.

mod cron;
mod doctor;
mod init;
mod run;
mod signals;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::logging::{self, LogFormat};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "scrapesync")]
#[command(version)]
#[command(
    about = "Pull a git checkout, run every scraper script in it, commit and push the results",
    long_about = None
)]
struct Cli {
    /// Log format written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ConfigArg {
    /// Config file [default: ./scrapesync.toml]
    #[arg(short, long, env = "SCRAPESYNC_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull, run every scraper script, then commit and push the results
    #[clap(visible_alias = "r")]
    Run {
        #[command(flatten)]
        config: ConfigArg,
        /// Working directory, overriding job.workdir
        #[arg(long)]
        workdir: Option<PathBuf>,
        /// Per-script timeout in seconds, overriding job.script_timeout_secs
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// Wait for a running job to finish instead of skipping
        #[arg(long)]
        wait: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the prepared environment
    Doctor {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Print the crontab entry for the configured schedule
    Cron {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Write a starter scrapesync.toml
    #[clap(visible_alias = "i")]
    Init {
        /// Directory to write the config into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Run { config, workdir, timeout, wait, json } => {
            run::run_job(run::RunArgs { config: config.config, workdir, timeout, wait, json })
        }
        Commands::Doctor { config } => doctor::run_doctor(config.config),
        Commands::Cron { config } => cron::run_cron(config.config).map(|_| 0),
        Commands::Init { dir, force } => init::run_init(dir, force).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
