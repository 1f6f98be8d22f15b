//! Cancellable single-flight debounce timer.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns at most one pending timer; scheduling replaces the previous one.
///
/// Backed by `tokio::time::sleep`, so tests drive it with a paused runtime
/// clock instead of wall-time waits. Dropping the debouncer cancels any
/// pending fire.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending fire and schedules `action` to run after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Cancels the pending fire, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
