use serde::{Deserialize, Serialize};

/// A named scoring weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub name: String,
    pub value: f64,
}

/// Stored shape of a weight document; the name is the document id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEnvelope {
    pub value: f64,
}
