//! Cooperative termination signal capture.
//!
//! Signal delivery is the only asynchronous event in the substrate; it
//! merely sets a flag. The hosting loop polls the flag between units of
//! work and stops on its own terms — handling is cooperative, never
//! preemptive, so a slow unit of work delays observation until the next
//! poll.
//!
//! Registration is best-effort: when the platform lacks signal handling
//! or another handler already owns the process, the signal is marked
//! unavailable and [`ShutdownSignal::poll`] simply always returns
//! `false`. Install the handler only once the application is compiled
//! and ready to run, so a signal cannot be swallowed during a long
//! configuration load.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Pollable termination flag.
pub struct ShutdownSignal {
    state: SignalState,
}

enum SignalState {
    /// Signal capture is not available; polling always reports false.
    Unavailable,
    /// Handler registered; the flag flips to true exactly once.
    Armed(Arc<AtomicBool>),
}

impl ShutdownSignal {
    /// Attempts to register a termination handler (SIGTERM and Ctrl-C).
    ///
    /// Never fails: any registration problem yields the unavailable
    /// state instead.
    pub fn install() -> Self {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = flag.clone();
        match ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        }) {
            Ok(()) => Self {
                state: SignalState::Armed(flag),
            },
            Err(e) => {
                tracing::debug!("termination signal capture unavailable: {e}");
                Self::unavailable()
            }
        }
    }

    /// A signal that can never fire. Used on platforms without signal
    /// support and before [`install`](Self::install) has run.
    pub fn unavailable() -> Self {
        Self {
            state: SignalState::Unavailable,
        }
    }

    /// Whether a handler is actually registered.
    pub fn is_available(&self) -> bool {
        matches!(self.state, SignalState::Armed(_))
    }

    /// Returns whether a termination signal has been received.
    ///
    /// Never blocks and never fails; unavailable capture reads as
    /// `false` forever. Once true, stays true.
    pub fn poll(&self) -> bool {
        match &self.state {
            SignalState::Unavailable => false,
            SignalState::Armed(flag) => flag.load(Ordering::SeqCst),
        }
    }

    #[cfg(test)]
    fn armed_for_test() -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                state: SignalState::Armed(flag.clone()),
            },
            flag,
        )
    }
}
