use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during profile, account and role operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("User backend error: {0}")]
    Backend(FrameworkError),
}

impl From<FrameworkError> for UserError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => UserError::NotFound(id),
            FrameworkError::Duplicate { id, .. } => UserError::AlreadyExists(id),
            FrameworkError::Rejected { reason, .. } => UserError::ValidationError(reason),
            other => UserError::Backend(other),
        }
    }
}
