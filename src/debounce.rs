//! Trailing-edge debouncer for search-triggered refetches.
//!
//! Every `call` restarts the quiet window; only the last value seen inside a
//! window is delivered on the output channel.

use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    window: Duration,
    output: mpsc::UnboundedSender<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (output, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer {
            window,
            output,
            pending: Mutex::new(None),
        };
        (debouncer, rx)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value`, replacing whatever was waiting.
    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let output = self.output.clone();
        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if output.send(value).is_err() {
                log::debug!("Debounced value dropped: receiver closed");
            }
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
