use parking_lot::RwLock;
use storage::models::{ApprovalState, Competition};

/// Local cache of the `competitions` collection.
///
/// Records added during the session are kept most-recent-first; records
/// from a bulk load are appended in collection order.
#[derive(Debug, Default)]
pub struct CompetitionLedger {
    records: RwLock<Vec<Competition>>,
}

impl CompetitionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Competition> {
        self.records.read().iter().find(|c| c.id == id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Competition> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Records currently in `state`
    pub fn in_state(&self, state: ApprovalState) -> Vec<Competition> {
        self.records
            .read()
            .iter()
            .filter(|c| c.approval_state == state)
            .cloned()
            .collect()
    }

    pub(crate) fn ids_in_state(&self, state: ApprovalState) -> Vec<String> {
        self.in_state(state).into_iter().map(|c| c.id).collect()
    }

    /// Append loaded records after the ones already cached
    pub(crate) fn extend(&self, loaded: Vec<Competition>) {
        self.records.write().extend(loaded);
    }

    pub(crate) fn prepend(&self, competition: Competition) {
        self.records.write().insert(0, competition);
    }

    pub(crate) fn remove(&self, id: &str) -> Option<Competition> {
        let mut records = self.records.write();
        let index = records.iter().position(|c| c.id == id)?;
        Some(records.remove(index))
    }

    /// Replace the record with the same id; false when it is not cached
    pub(crate) fn replace(&self, competition: Competition) -> bool {
        let mut records = self.records.write();
        match records.iter_mut().find(|c| c.id == competition.id) {
            Some(existing) => {
                *existing = competition;
                true
            }
            None => false,
        }
    }

    /// Set the approval state of one record; false when it is not cached
    pub(crate) fn set_approval_state(&self, id: &str, state: ApprovalState) -> bool {
        let mut records = self.records.write();
        match records.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                existing.approval_state = state;
                true
            }
            None => false,
        }
    }

    /// Mark the listed records as published, returning how many were cached
    pub(crate) fn mark_published(&self, ids: &[String]) -> usize {
        let mut records = self.records.write();
        let mut applied = 0;
        for record in records.iter_mut().filter(|c| ids.contains(&c.id)) {
            record.approval_state = ApprovalState::Published;
            applied += 1;
        }
        applied
    }
}
