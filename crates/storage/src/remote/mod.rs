mod memory;
mod postgres;

pub use memory::{Call, MemoryStore};
pub use postgres::PgStore;

use async_trait::async_trait;
use std::fmt;

use crate::document::{Document, FieldUpdate, Fields};
use crate::error::Result;

/// Keyed document store holding named collections.
///
/// Every call is independent: only `batch_update` is atomic across documents.
/// `delete` of a missing document succeeds, `update` of a missing document
/// fails with `StorageError::NotFound`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document of a collection, in collection order
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Fetch a single document
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Create a document and return the id assigned by the store
    async fn add(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Create or fully replace the document under `id`
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Merge `fields` into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Apply every update or none of them
    async fn batch_update(&self, collection: &str, updates: Vec<FieldUpdate>) -> Result<()>;
}

/// Remote primitives, used to script failures and inspect calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    Get,
    Add,
    Set,
    Update,
    Delete,
    BatchUpdate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::GetAll => "get_all",
            Operation::Get => "get",
            Operation::Add => "add",
            Operation::Set => "set",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::BatchUpdate => "batch_update",
        };
        f.write_str(name)
    }
}
