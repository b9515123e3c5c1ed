use parking_lot::RwLock;
use storage::dto::user::Identity;
use storage::models::{Role, SubmittedBy, User, UserProfile};

use crate::error::Result;

/// The signed-in user, or the guest record when nobody is signed in
#[derive(Debug, Default)]
pub struct SessionContext {
    user: RwLock<User>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> User {
        self.user.read().clone()
    }

    pub fn identity(&self) -> Identity {
        let user = self.user.read();
        Identity {
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            photo_url: user.photo_url.clone(),
        }
    }

    pub fn role(&self) -> Role {
        self.user.read().role
    }

    pub fn team(&self) -> String {
        self.user.read().team.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        !self.user.read().is_guest()
    }

    /// Snapshot stamped on competitions created during this session
    pub fn submitted_by(&self) -> SubmittedBy {
        let user = self.user.read();
        SubmittedBy {
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }

    /// Combine an identity with its stored profile into the session user
    pub(crate) fn establish(&self, identity: Identity, profile: UserProfile) -> Result<User> {
        let role: Role = profile.role.parse()?;
        let user = User {
            display_name: identity.display_name,
            email: identity.email,
            photo_url: identity.photo_url,
            role,
            team: profile.team,
        };

        *self.user.write() = user.clone();
        Ok(user)
    }

    pub(crate) fn reset(&self) {
        *self.user.write() = User::guest();
    }
}
