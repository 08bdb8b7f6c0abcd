//! One-way progress stream from the pipeline to the presentation layer.
//!
//! The pipeline runs off the interactive thread; these status strings are
//! the only data crossing the boundary until the final list is handed back.
//! The consumer polls on a fixed interval and never blocks.

use tokio::sync::mpsc;

/// Producer half. Cloneable; emitting never blocks, and a vanished consumer
/// is ignored — reporting must not change the pipeline's outcome.
#[derive(Clone)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<String>,
}

impl ProgressSender {
    pub fn emit(&self, message: impl Into<String>) {
        // A closed channel just means nobody is listening anymore.
        let _ = self.tx.send(message.into());
    }
}

/// Consumer half, built for a fixed-interval poll loop.
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<String>,
}

impl ProgressReceiver {
    /// All messages queued since the last call, in emission order. Never
    /// blocks; returns an empty list when nothing is pending.
    pub fn drain(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }
}

/// Create a connected progress channel pair.
#[must_use]
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx }, ProgressReceiver { rx })
}
