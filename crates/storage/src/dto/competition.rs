use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ApprovalState;

/// Request payload for recording a new match result
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCompetition {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Winner must be between 1 and 64 characters"
    ))]
    pub winner: String,

    #[validate(length(
        min = 1,
        max = 64,
        message = "Loser must be between 1 and 64 characters"
    ))]
    pub loser: String,

    #[serde(default)]
    pub tied: bool,
}

impl NewCompetition {
    pub fn new(winner: impl Into<String>, loser: impl Into<String>) -> Self {
        Self {
            winner: winner.into(),
            loser: loser.into(),
            tied: false,
        }
    }

    pub fn tie(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            tied: true,
            ..Self::new(first, second)
        }
    }
}

/// Merge-write payload for an approval transition
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatePatch {
    pub approval_state: ApprovalState,
}
