use crate::collections::USERS;
use crate::error::{Result, StorageError};
use crate::models::UserProfile;
use crate::remote::DocumentStore;

/// Repository for the `users` collection, keyed by email
pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Get the profile stored for an email
    pub async fn find_by_email(&self, email: &str) -> Result<UserProfile> {
        let doc = self
            .store
            .get(USERS, email)
            .await?
            .ok_or_else(|| StorageError::not_found(USERS, email))?;

        doc.decode(USERS)
    }
}
