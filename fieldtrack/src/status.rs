//! Status Sink - the single human-readable outcome line.
//!
//! Every lifecycle step and delivery attempt writes a short status string
//! here. Writers overwrite the value (last write wins); the validation step
//! uses [`StatusSink::append`] to keep its POST and GET results on one line.
//! No history is kept.
//!
//! The value lives in a `tokio::sync::watch` channel, so writes from the
//! foreground poller, the watch dispatcher and the session are synchronized
//! and any number of observers (UI binding, CLI) can subscribe.

use std::sync::Arc;

use tokio::sync::watch;

/// Observable status line, cheap to clone.
#[derive(Debug, Clone)]
pub struct StatusSink {
    tx: Arc<watch::Sender<String>>,
}

impl StatusSink {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx: Arc::new(tx) }
    }

    /// Replace the status line.
    pub fn set(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(status = %message, "Status");
        self.tx.send_replace(message);
    }

    /// Append to the current status line.
    pub fn append(&self, suffix: impl AsRef<str>) {
        let suffix = suffix.as_ref();
        self.tx.send_modify(|current| current.push_str(suffix));
        let current = self.current();
        tracing::info!(status = %current, "Status");
    }

    /// Current status line.
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Observe status changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for StatusSink {
    fn default() -> Self {
        Self::new()
    }
}
