pub mod document;
pub mod dto;
pub mod error;
pub mod models;
pub mod remote;
pub mod repository;

pub use document::{Document, FieldUpdate, Fields};
pub use error::{Result, StorageError, UnknownVariant};
pub use remote::{DocumentStore, MemoryStore, Operation, PgStore};

/// Collection names shared with every client of the remote store
pub mod collections {
    pub const COMPETITIONS: &str = "competitions";
    pub const WEIGHTS: &str = "weights";
    pub const USERS: &str = "users";
}
