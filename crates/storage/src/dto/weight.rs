use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for creating or changing a weight
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeightRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_finite"))]
    pub value: f64,
}

impl WeightRequest {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

fn validate_finite(value: f64) -> Result<(), validator::ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("not_finite"))
    }
}
