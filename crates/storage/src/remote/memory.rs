use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use uuid::Uuid;

use super::{DocumentStore, Operation};
use crate::document::{Document, FieldUpdate, Fields, merge_fields};
use crate::error::{Result, StorageError};

#[derive(Debug, Default)]
struct Collection {
    order: Vec<String>,
    documents: HashMap<String, Fields>,
}

impl Collection {
    fn upsert(&mut self, id: &str, fields: Fields) {
        if self.documents.insert(id.to_string(), fields).is_none() {
            self.order.push(id.to_string());
        }
    }

    fn remove(&mut self, id: &str) {
        if self.documents.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
        }
    }
}

#[derive(Debug)]
struct ScriptedFailure {
    collection: String,
    operation: Operation,
    /// Matching calls still allowed through before this one fails
    skip: usize,
}

/// A call received by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub collection: String,
    pub operation: Operation,
    pub id: Option<String>,
}

/// In-process document store.
///
/// Keeps insertion order per collection and assigns v4 UUIDs on `add`.
/// Failures can be scripted per collection and operation with [`MemoryStore::fail_next`]
/// and [`MemoryStore::fail_nth`]; each scripted failure is consumed by the call it fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    failures: Mutex<Vec<ScriptedFailure>>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document directly, bypassing failure scripting and the call log
    pub fn seed(&self, collection: &str, id: &str, fields: Fields) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .upsert(id, fields);
    }

    /// Make the next `operation` on `collection` fail with `StorageError::Unavailable`
    pub fn fail_next(&self, collection: &str, operation: Operation) {
        self.fail_nth(collection, operation, 1);
    }

    /// Make the `n`th upcoming `operation` on `collection` fail, counting from 1.
    /// Earlier matching calls succeed unless another failure is scripted for them.
    pub fn fail_nth(&self, collection: &str, operation: Operation, n: usize) {
        self.failures.lock().push(ScriptedFailure {
            collection: collection.to_string(),
            operation,
            skip: n.saturating_sub(1),
        });
    }

    /// Current fields of a document
    pub fn document(&self, collection: &str, id: &str) -> Option<Fields> {
        self.collections
            .read()
            .get(collection)
            .and_then(|c| c.documents.get(id).cloned())
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.order.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Every call received so far, in arrival order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Calls of one kind received so far
    pub fn calls_to(&self, operation: Operation) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    fn begin(&self, collection: &str, operation: Operation, id: Option<&str>) -> Result<()> {
        self.calls.lock().push(Call {
            collection: collection.to_string(),
            operation,
            id: id.map(str::to_string),
        });

        let mut failures = self.failures.lock();
        let mut triggered = None;
        for (index, failure) in failures.iter_mut().enumerate() {
            if failure.collection != collection || failure.operation != operation {
                continue;
            }
            if failure.skip == 0 && triggered.is_none() {
                triggered = Some(index);
            } else {
                failure.skip = failure.skip.saturating_sub(1);
            }
        }

        if let Some(index) = triggered {
            failures.remove(index);
            tracing::debug!("Injected {} failure on {}", operation, collection);
            return Err(StorageError::Unavailable(format!(
                "{} on {} rejected",
                operation, collection
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.begin(collection, Operation::GetAll, None)?;

        let collections = self.collections.read();
        let documents = collections
            .get(collection)
            .map(|c| {
                c.order
                    .iter()
                    .filter_map(|id| {
                        c.documents
                            .get(id)
                            .map(|fields| Document::new(id.clone(), fields.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.begin(collection, Operation::Get, Some(id))?;
        Ok(self
            .document(collection, id)
            .map(|fields| Document::new(id, fields)))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String> {
        self.begin(collection, Operation::Add, None)?;

        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .upsert(&id, fields);

        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.begin(collection, Operation::Set, Some(id))?;
        self.seed(collection, id, fields);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.begin(collection, Operation::Update, Some(id))?;

        let mut collections = self.collections.write();
        let existing = collections
            .get_mut(collection)
            .and_then(|c| c.documents.get_mut(id))
            .ok_or_else(|| StorageError::not_found(collection, id))?;
        merge_fields(existing, fields);

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.begin(collection, Operation::Delete, Some(id))?;

        if let Some(c) = self.collections.write().get_mut(collection) {
            c.remove(id);
        }

        Ok(())
    }

    async fn batch_update(&self, collection: &str, updates: Vec<FieldUpdate>) -> Result<()> {
        self.begin(collection, Operation::BatchUpdate, None)?;

        let mut collections = self.collections.write();
        if updates.is_empty() {
            return Ok(());
        }

        let target = collections
            .get_mut(collection)
            .ok_or_else(|| StorageError::not_found(collection, &updates[0].id))?;

        // Validate the whole batch before touching any document
        if let Some(missing) = updates
            .iter()
            .find(|update| !target.documents.contains_key(&update.id))
        {
            return Err(StorageError::not_found(collection, &missing.id));
        }

        for update in updates {
            if let Some(existing) = target.documents.get_mut(&update.id) {
                merge_fields(existing, update.fields);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_add_assigns_distinct_ids_in_order() {
        let store = MemoryStore::new();
        let first = store
            .add("competitions", fields(json!({ "winner": "red" })))
            .await
            .unwrap();
        let second = store
            .add("competitions", fields(json!({ "winner": "blue" })))
            .await
            .unwrap();

        assert_ne!(first, second);
        let all = store.get_all("competitions").await.unwrap();
        let ids: Vec<_> = all.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn test_update_merges_and_requires_existing_document() {
        let store = MemoryStore::new();
        store.seed("weights", "red", fields(json!({ "value": 1 })));

        store
            .update("weights", "red", fields(json!({ "value": 3 })))
            .await
            .unwrap();
        assert_eq!(
            store.document("weights", "red"),
            Some(fields(json!({ "value": 3 })))
        );

        let err = store
            .update("weights", "blue", fields(json!({ "value": 3 })))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_set_replaces_whole_document() {
        let store = MemoryStore::new();
        store.seed("competitions", "c1", fields(json!({ "winner": "red", "tied": true })));

        store
            .set("competitions", "c1", fields(json!({ "winner": "blue" })))
            .await
            .unwrap();

        assert_eq!(
            store.document("competitions", "c1"),
            Some(fields(json!({ "winner": "blue" })))
        );
        assert_eq!(store.len("competitions"), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_document_succeeds() {
        let store = MemoryStore::new();
        store.delete("weights", "ghost").await.unwrap();
        assert!(store.is_empty("weights"));
    }

    #[tokio::test]
    async fn test_batch_update_is_all_or_nothing() {
        let store = MemoryStore::new();
        store.seed("competitions", "a", fields(json!({ "approvalState": "approved" })));

        let updates = vec![
            FieldUpdate::new("a", fields(json!({ "approvalState": "published" }))),
            FieldUpdate::new("missing", fields(json!({ "approvalState": "published" }))),
        ];
        let err = store.batch_update("competitions", updates).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            store.document("competitions", "a"),
            Some(fields(json!({ "approvalState": "approved" })))
        );
    }

    #[tokio::test]
    async fn test_empty_batch_commits() {
        let store = MemoryStore::new();
        store.batch_update("competitions", Vec::new()).await.unwrap();
        assert_eq!(store.calls_to(Operation::BatchUpdate).len(), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed_once() {
        let store = MemoryStore::new();
        store.fail_next("weights", Operation::Set);

        let first = store
            .set("weights", "red", fields(json!({ "value": 1 })))
            .await;
        assert!(matches!(first, Err(StorageError::Unavailable(_))));
        assert!(store.document("weights", "red").is_none());

        store
            .set("weights", "red", fields(json!({ "value": 1 })))
            .await
            .unwrap();
        assert!(store.document("weights", "red").is_some());
    }

    #[tokio::test]
    async fn test_fail_nth_lets_earlier_calls_through() {
        let store = MemoryStore::new();
        store.fail_nth("competitions", Operation::Add, 2);

        let first = store
            .add("competitions", fields(json!({ "winner": "blue" })))
            .await;
        let second = store
            .add("competitions", fields(json!({ "winner": "red" })))
            .await;
        let third = store
            .add("competitions", fields(json!({ "winner": "red" })))
            .await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(StorageError::Unavailable(_))));
        assert!(third.is_ok());
        assert_eq!(store.len("competitions"), 2);
    }

    #[tokio::test]
    async fn test_stacked_failures_fail_consecutive_calls() {
        let store = MemoryStore::new();
        store.fail_next("weights", Operation::Delete);
        store.fail_nth("weights", Operation::Delete, 2);

        assert!(store.delete("weights", "red").await.is_err());
        assert!(store.delete("weights", "red").await.is_err());
        assert!(store.delete("weights", "red").await.is_ok());
    }

    #[tokio::test]
    async fn test_scripted_failure_is_scoped_to_collection() {
        let store = MemoryStore::new();
        store.fail_next("weights", Operation::GetAll);

        assert!(store.get_all("competitions").await.is_ok());
        assert!(store.get_all("weights").await.is_err());
        assert_eq!(store.calls_to(Operation::GetAll).len(), 2);
    }
}
