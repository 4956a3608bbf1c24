//! Routes SIGINT and SIGTERM to the run's cancellation token.

use crate::domain::{AppError, CancellationToken};

#[cfg(unix)]
mod imp {
    use std::thread;

    use tokio::runtime::Builder;
    use tokio::signal::unix::{SignalKind, signal};

    use crate::domain::{AppError, CancellationToken};

    pub(super) fn install(cancel: &CancellationToken) -> Result<(), AppError> {
        let runtime = Builder::new_current_thread().enable_io().build()?;
        // Register before returning so a signal during the run is never lost
        // to the default disposition.
        let (mut interrupt, mut terminate) = runtime.block_on(async {
            Ok::<_, std::io::Error>((signal(SignalKind::interrupt())?, signal(SignalKind::terminate())?))
        })?;

        let cancel = cancel.clone();
        thread::Builder::new().name("scrapesync-signals".to_string()).spawn(move || {
            runtime.block_on(async {
                let name = tokio::select! {
                    _ = interrupt.recv() => "SIGINT",
                    _ = terminate.recv() => "SIGTERM",
                };
                tracing::warn!(signal = name, "received signal; cancelling run");
                cancel.cancel();
            });
        })?;
        Ok(())
    }
}

/// Install process-wide handlers for the lifetime of the process.
pub fn install(cancel: &CancellationToken) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        imp::install(cancel)
    }
    #[cfg(not(unix))]
    {
        let _ = cancel;
        Ok(())
    }
}
