pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod error_slot;
pub mod events;
pub mod ledger;
pub mod roster;
pub mod session;
pub mod telemetry;
pub mod weights;

pub use config::TrackerConfig;
pub use context::StoreContext;
pub use engine::{Submission, SyncEngine};
pub use error::{Result, TrackerError};
pub use error_slot::ErrorSlot;
pub use events::StoreEvent;
pub use ledger::CompetitionLedger;
pub use roster::TeamRoster;
pub use session::SessionContext;
pub use weights::WeightTable;
