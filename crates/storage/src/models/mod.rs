mod approval_state;
mod competition;
mod user;
mod weight;

pub use approval_state::ApprovalState;
pub use competition::{Competition, SubmittedBy};
pub use user::{Role, User, UserProfile};
pub use weight::{Weight, WeightEnvelope};
