//! Coalescing, cancellable delayed delivery
//!
//! A [`Debouncer`] owns at most one pending timer. Every call to
//! [`Debouncer::schedule`] replaces the pending payload and restarts the quiet
//! period, so a burst of events produces exactly one delivery carrying the
//! last payload. Dropping the debouncer cancels whatever is pending.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Delivers the last scheduled payload to a sink once `delay` has elapsed
/// without another `schedule` call.
///
/// Timers run on the ambient tokio runtime. Outside a runtime there is no
/// timer to defer onto, so `schedule` delivers immediately.
pub struct Debouncer<T> {
    delay: Duration,
    sink: Sink<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that hands coalesced payloads to `sink`.
    pub fn new<F>(delay: Duration, sink: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            sink: Arc::new(sink),
            pending: Mutex::new(None),
        }
    }

    /// The quiet period a payload must survive before delivery.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending payload with `payload` and restart the timer.
    pub fn schedule(&self, payload: T) {
        let mut pending = self.lock_pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let sink = Arc::clone(&self.sink);
        match Handle::try_current() {
            Ok(runtime) => {
                let delay = self.delay;
                *pending = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    sink(payload);
                }));
            }
            Err(_) => {
                drop(pending);
                tracing::debug!("no tokio runtime, delivering debounced payload immediately");
                sink(payload);
            }
        }
    }

    /// Drop the pending payload, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.lock_pending().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a payload is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
