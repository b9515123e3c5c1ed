use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownVariant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Student,
    Leader,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Guest, Role::Student, Role::Leader, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Student => "student",
            Role::Leader => "leader",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("role", s))
    }
}

/// Raw profile document of the `users` collection, keyed by email.
///
/// `role` is kept as text so that the caller decides how to treat values
/// outside of [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub team: String,
}

/// The signed-in user as seen by the rest of the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: String,
    pub email: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub role: Role,
    pub team: String,
}

impl User {
    /// The signed-out user
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn is_guest(&self) -> bool {
        self.role == Role::Guest && self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guest_is_all_empty() {
        let guest = User::guest();
        assert!(guest.is_guest());
        assert!(guest.display_name.is_empty());
        assert!(guest.team.is_empty());
        assert_eq!(guest.role, Role::Guest);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("leader".parse::<Role>().unwrap(), Role::Leader);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_serializes_photo_url_key() {
        let user = User {
            photo_url: "https://example.com/a.png".to_string(),
            ..User::guest()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["photoURL"], json!("https://example.com/a.png"));
        assert_eq!(value["role"], json!("guest"));
    }
}
