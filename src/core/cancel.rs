//! Cooperative cancellation
//!
//! SIGINT and SIGTERM set a shared flag. Workers stop picking up files once it
//! is set and the report writer refuses to commit, so an interrupted run
//! leaves the output directory untouched. A second signal exits immediately,
//! except while reports are being moved into place: then the exit waits until
//! the install or its rollback has finished.

use crate::error::{CartographerError, Result};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    exit_lock: Arc<Mutex<()>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once cancelled
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CartographerError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Hold off a forced exit until the returned guard is dropped
    pub fn defer_exit(&self) -> MutexGuard<'_, ()> {
        self.exit_lock.lock()
    }

    /// Whether a forced exit is currently held off
    pub fn exit_deferred(&self) -> bool {
        self.exit_lock.is_locked()
    }

    /// First signal cancels; a repeated signal exits once no guard is held.
    /// Returns whether the process should exit now.
    #[cfg_attr(not(unix), allow(dead_code))]
    fn on_signal(&self) -> bool {
        if self.flag.swap(true, Ordering::SeqCst) {
            if self.exit_deferred() {
                warn!("Interrupted again; exiting once the reports are in place");
            }
            true
        } else {
            warn!("Interrupted; stopping. Press Ctrl-C again to exit immediately");
            false
        }
    }

    /// Watch SIGINT and SIGTERM on a background thread
    #[cfg(unix)]
    pub fn install_signal_handlers(&self) -> Result<()> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(CartographerError::io_error)?;
        let token = self.clone();

        std::thread::Builder::new()
            .name("signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    if token.on_signal() {
                        let _held = token.defer_exit();
                        std::process::exit(128 + signal);
                    }
                }
            })
            .map_err(CartographerError::io_error)?;

        Ok(())
    }

    #[cfg(not(unix))]
    pub fn install_signal_handlers(&self) -> Result<()> {
        Ok(())
    }
}
