use crate::collections::WEIGHTS;
use crate::document::to_fields;
use crate::error::Result;
use crate::models::{Weight, WeightEnvelope};
use crate::remote::DocumentStore;

/// Repository for the `weights` collection, keyed by weight name
pub struct WeightRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> WeightRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List all weights with their `{value}` envelope unwrapped
    pub async fn list(&self) -> Result<Vec<Weight>> {
        let documents = self.store.get_all(WEIGHTS).await?;

        let weights = documents
            .into_iter()
            .filter_map(|doc| match doc.decode::<WeightEnvelope>(WEIGHTS) {
                Ok(envelope) => Some(Weight {
                    name: doc.id,
                    value: envelope.value,
                }),
                Err(e) => {
                    tracing::warn!("Skipping weight document: {}", e);
                    None
                }
            })
            .collect();

        Ok(weights)
    }

    /// Write `{value}` under `name`, creating the document when needed
    pub async fn put(&self, name: &str, value: f64) -> Result<()> {
        self.store
            .set(WEIGHTS, name, to_fields(&WeightEnvelope { value })?)
            .await
    }

    /// Merge a new value into an existing weight document
    pub async fn update(&self, name: &str, value: f64) -> Result<()> {
        self.store
            .update(WEIGHTS, name, to_fields(&WeightEnvelope { value })?)
            .await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.store.delete(WEIGHTS, name).await
    }
}
