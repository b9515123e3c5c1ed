use serde::{Deserialize, Serialize};

use super::ApprovalState;

/// Identity of the submitter, copied into the record at creation time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBy {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// A recorded result between two teams.
///
/// A tie is stored as two records with `winner` and `loser` swapped.
/// The `id` lives outside the document fields and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(skip)]
    pub id: String,
    pub winner: String,
    pub loser: String,
    #[serde(default)]
    pub tied: bool,
    pub approval_state: ApprovalState,
    #[serde(default)]
    pub submitted_by: SubmittedBy,
}

impl Competition {
    /// The same result seen from the other side
    pub fn mirrored(&self) -> Self {
        Self {
            id: String::new(),
            winner: self.loser.clone(),
            loser: self.winner.clone(),
            ..self.clone()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_mirror_of(&self, other: &Competition) -> bool {
        self.winner == other.loser && self.loser == other.winner
    }
}
