use std::sync::Arc;
use tokio::sync::broadcast;

use crate::error::TrackerError;
use crate::error_slot::ErrorSlot;
use crate::events::StoreEvent;
use crate::ledger::CompetitionLedger;
use crate::session::SessionContext;
use crate::weights::WeightTable;

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Application state shared between the sync engine and the presentation layer
#[derive(Debug)]
pub struct StoreContext {
    weights: WeightTable,
    ledger: CompetitionLedger,
    session: SessionContext,
    errors: ErrorSlot,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl StoreContext {
    pub fn new(event_capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(event_capacity.max(1));
        Self {
            weights: WeightTable::new(),
            ledger: CompetitionLedger::new(),
            session: SessionContext::new(),
            errors: ErrorSlot::new(),
            event_tx,
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn ledger(&self) -> &CompetitionLedger {
        &self.ledger
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn errors(&self) -> &ErrorSlot {
        &self.errors
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    /// Store an absorbed failure in the error slot and notify observers
    pub(crate) fn record_error(&self, error: TrackerError) -> Arc<TrackerError> {
        tracing::error!("{}", error);
        let error = self.errors.record(error);
        self.emit(StoreEvent::ErrorRecorded {
            code: error.code(),
            message: error.to_string(),
        });
        error
    }
}

impl Default for StoreContext {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
