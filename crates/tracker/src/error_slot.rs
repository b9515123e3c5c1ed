use std::sync::Arc;
use tokio::sync::watch;

use crate::error::TrackerError;

/// Shared "last error" slot for operations that absorb their failures.
///
/// Holds at most one error; recording replaces the previous one. Presentation
/// code either polls [`ErrorSlot::last`] or awaits changes on a receiver.
#[derive(Debug)]
pub struct ErrorSlot {
    tx: watch::Sender<Option<Arc<TrackerError>>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub fn record(&self, error: TrackerError) -> Arc<TrackerError> {
        let error = Arc::new(error);
        self.tx.send_replace(Some(error.clone()));
        error
    }

    pub fn last(&self) -> Option<Arc<TrackerError>> {
        self.tx.borrow().clone()
    }

    /// Empty the slot, returning what it held
    pub fn clear(&self) -> Option<Arc<TrackerError>> {
        self.tx.send_replace(None)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<TrackerError>>> {
        self.tx.subscribe()
    }
}

impl Default for ErrorSlot {
    fn default() -> Self {
        Self::new()
    }
}
