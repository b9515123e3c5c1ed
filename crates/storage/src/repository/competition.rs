use serde_json::Value;

use crate::collections::COMPETITIONS;
use crate::document::{Document, FieldUpdate, to_fields};
use crate::dto::competition::ApprovalStatePatch;
use crate::error::Result;
use crate::models::{ApprovalState, Competition};
use crate::remote::DocumentStore;

const APPROVAL_STATE_KEY: &str = "approvalState";

/// Repository for the `competitions` collection
pub struct CompetitionRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List all competitions in collection order.
    ///
    /// Records stored before the approval workflow existed have no approval
    /// state and are read as `submitted`. Documents that cannot be decoded are
    /// skipped.
    pub async fn list(&self) -> Result<Vec<Competition>> {
        let documents = self.store.get_all(COMPETITIONS).await?;
        let total = documents.len();

        let competitions: Vec<Competition> = documents
            .into_iter()
            .filter_map(|doc| match decode(doc) {
                Ok(competition) => Some(competition),
                Err(e) => {
                    tracing::warn!("Skipping competition document: {}", e);
                    None
                }
            })
            .collect();

        if competitions.len() < total {
            tracing::warn!(
                "Loaded {} of {} competition documents",
                competitions.len(),
                total
            );
        }

        Ok(competitions)
    }

    /// Create a competition document and return its assigned id
    pub async fn create(&self, competition: &Competition) -> Result<String> {
        let id = self.store.add(COMPETITIONS, to_fields(competition)?).await?;
        tracing::debug!(
            "Created competition {} ({} over {})",
            id,
            competition.winner,
            competition.loser
        );
        Ok(id)
    }

    /// Replace every field of an existing competition
    pub async fn replace(&self, competition: &Competition) -> Result<()> {
        self.store
            .set(COMPETITIONS, &competition.id, to_fields(competition)?)
            .await
    }

    /// Merge-write the approval state of one competition
    pub async fn set_approval_state(&self, id: &str, state: ApprovalState) -> Result<()> {
        let patch = to_fields(&ApprovalStatePatch {
            approval_state: state,
        })?;
        self.store.update(COMPETITIONS, id, patch).await
    }

    /// Atomically move every listed competition to `published`
    pub async fn publish(&self, ids: &[String]) -> Result<()> {
        let patch = to_fields(&ApprovalStatePatch {
            approval_state: ApprovalState::Published,
        })?;

        let updates = ids
            .iter()
            .map(|id| FieldUpdate::new(id.clone(), patch.clone()))
            .collect();

        self.store.batch_update(COMPETITIONS, updates).await
    }

    /// Delete a competition by id
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(COMPETITIONS, id).await
    }
}

fn decode(mut doc: Document) -> Result<Competition> {
    let missing = match doc.fields.get(APPROVAL_STATE_KEY) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing {
        doc.fields.insert(
            APPROVAL_STATE_KEY.to_string(),
            Value::String(ApprovalState::Submitted.as_str().to_string()),
        );
    }

    let competition: Competition = doc.decode(COMPETITIONS)?;
    Ok(competition.with_id(doc.id))
}
