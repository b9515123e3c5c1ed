use storage::{StorageError, UnknownVariant};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Remote read failed: {0}")]
    RemoteRead(#[source] StorageError),

    #[error("Remote write failed: {0}")]
    RemoteWrite(#[source] StorageError),

    #[error("Remote delete failed: {0}")]
    RemoteDelete(#[source] StorageError),

    #[error("No user profile for {0}")]
    UserNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error(transparent)]
    InvalidValue(#[from] UnknownVariant),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Short machine-readable code for presentation layers
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::RemoteRead(_) => "remote_read",
            TrackerError::RemoteWrite(_) => "remote_write",
            TrackerError::RemoteDelete(_) => "remote_delete",
            TrackerError::UserNotFound(_) => "user_not_found",
            TrackerError::Validation(_) => "validation",
            TrackerError::UnknownTeam(_) => "unknown_team",
            TrackerError::InvalidValue(_) => "invalid_value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = TrackerError::RemoteDelete(StorageError::Unavailable("offline".into()));
        assert_eq!(err.code(), "remote_delete");
        assert_eq!(
            TrackerError::UserNotFound("ana@example.com".into()).code(),
            "user_not_found"
        );
    }

    #[test]
    fn test_display_includes_cause() {
        let err = TrackerError::RemoteWrite(StorageError::Unavailable("add rejected".into()));
        assert_eq!(
            err.to_string(),
            "Remote write failed: Remote store unavailable: add rejected"
        );
    }

    #[test]
    fn test_unknown_variant_converts() {
        let err: TrackerError = "archived"
            .parse::<storage::models::ApprovalState>()
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "invalid_value");
        assert!(err.to_string().contains("archived"));
    }
}
