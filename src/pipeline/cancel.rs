//! One-shot cancellation shared by the walker and the workers.
//!
//! The signal is a channel that never carries a value: cancelling drops the
//! only sender, which disconnects every receiver at once. Observers can
//! therefore use it as a `recv` arm in `crossbeam_channel::select!` next to
//! the send they would otherwise block on.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use std::sync::Mutex;

/// Owning side of the cancellation signal.
///
/// Held by the pipeline for the duration of one `extract_all` call. Dropping
/// it cancels, so every observer is released when the call returns.
#[derive(Debug)]
pub struct Cancellation {
    trigger: Mutex<Option<Sender<()>>>,
    signal: CancelSignal,
}

impl Cancellation {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            trigger: Mutex::new(Some(tx)),
            signal: CancelSignal { rx },
        }
    }

    /// A new observer handle.
    pub fn signal(&self) -> CancelSignal {
        self.signal.clone()
    }

    /// Trigger cancellation. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        let mut trigger = self
            .trigger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        trigger.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of the cancellation signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: Receiver<()>,
}

impl CancelSignal {
    /// Channel that becomes ready (disconnected) once cancellation happens.
    ///
    /// Intended for `recv(signal.channel()) -> _ => ...` arms in `select!`.
    pub fn channel(&self) -> &Receiver<()> {
        &self.rx
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }
}
