use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identity handed over by the authentication provider after sign-in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default, rename = "photoURL")]
    pub photo_url: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            photo_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_validated() {
        assert!(Identity::new("ana@example.com", "Ana").validate().is_ok());
        assert!(Identity::new("not-an-email", "Ana").validate().is_err());
    }
}
