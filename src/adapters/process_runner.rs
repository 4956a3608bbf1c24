//! Runs scraper scripts as child processes with a wall-clock limit.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::{AppError, CancellationToken, EnvPlan, UnitOutcome};
use crate::ports::ScriptRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawns `<program> <script>` in the working directory.
///
/// Stdin is closed; stdout and stderr are inherited so script output lands in
/// the job's log.
#[derive(Debug, Clone)]
pub struct ProcessScriptRunner {
    program: PathBuf,
    workdir: PathBuf,
    env: EnvPlan,
    timeout: Duration,
}

impl ProcessScriptRunner {
    pub fn new(program: PathBuf, workdir: PathBuf, env: EnvPlan, timeout: Duration) -> Self {
        Self { program, workdir, env, timeout }
    }

    fn command(&self, script: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(script).current_dir(&self.workdir).stdin(Stdio::null());
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut command, 0);
        for key in &self.env.remove {
            command.env_remove(key);
        }
        for (key, value) in &self.env.set {
            command.env(key, value);
        }
        command
    }

    /// Kill the script together with everything it spawned, then reap it.
    fn terminate(child: &mut Child) {
        kill_group(child);
        let _ = child.kill();
        let _ = child.wait();
    }
}

/// SIGKILL the script's process group. The group id is the script's pid.
#[cfg(unix)]
fn kill_group(child: &Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: plain syscall; ESRCH for an empty group is ignored.
    unsafe {
        libc::kill(-pgid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

impl ScriptRunner for ProcessScriptRunner {
    fn run(&self, script: &Path, cancel: &CancellationToken) -> Result<UnitOutcome, AppError> {
        let mut child = match self.command(script).spawn() {
            Ok(child) => child,
            Err(e) => {
                return Ok(UnitOutcome::SpawnFailed {
                    reason: format!("{}: {}", self.program.display(), e),
                });
            }
        };

        let start = Instant::now();
        loop {
            let polled = match child.try_wait() {
                Ok(polled) => polled,
                Err(e) => {
                    Self::terminate(&mut child);
                    return Err(e.into());
                }
            };
            if polled.is_some() {
                // Leftover background processes must not write during publish.
                kill_group(&child);
            }
            match polled {
                Some(status) if status.success() => return Ok(UnitOutcome::Succeeded),
                Some(status) => return Ok(UnitOutcome::Failed { code: status.code() }),
                None => {
                    if cancel.is_cancelled() {
                        Self::terminate(&mut child);
                        return Ok(UnitOutcome::Cancelled);
                    }
                    if start.elapsed() >= self.timeout {
                        Self::terminate(&mut child);
                        return Ok(UnitOutcome::TimedOut { after_secs: self.timeout.as_secs() });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }
}
