//! Terminate signals for the interactive view.
//!
//! SIGTERM (and SIGHUP on Unix) only set a flag. The event loop checks it
//! every iteration and leaves through its normal return, so the terminal
//! guard restores the screen before the process exits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::SIGTERM;

#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Registers the OS hooks. Registration is best-effort; a failure is
    /// logged and the view still quits on `q` or Ctrl+C.
    pub fn register() -> Self {
        let signal = ShutdownSignal::default();
        if let Err(e) = signal_hook::flag::register(SIGTERM, Arc::clone(&signal.flag)) {
            log::warn!("failed to register SIGTERM: {e}");
        }
        #[cfg(unix)]
        {
            use signal_hook::consts::SIGHUP;
            if let Err(e) = signal_hook::flag::register(SIGHUP, Arc::clone(&signal.flag)) {
                log::warn!("failed to register SIGHUP: {e}");
            }
        }
        signal
    }

    pub fn requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
