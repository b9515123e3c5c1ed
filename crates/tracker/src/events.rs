use storage::models::{ApprovalState, Role};

/// Change notifications for state observers
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    WeightsLoaded { count: usize },
    WeightSet { name: String, value: f64 },
    WeightRemoved { name: String },
    CompetitionsLoaded { count: usize },
    CompetitionAdded { id: String },
    CompetitionReplaced { id: String },
    ApprovalStateChanged { id: String, state: ApprovalState },
    CompetitionRemoved { id: String },
    Published { ids: Vec<String> },
    SessionChanged { email: String, role: Role },
    ErrorRecorded { code: &'static str, message: String },
}
