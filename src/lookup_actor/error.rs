use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during category and college operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("{table} entry not found: {id}")]
    NotFound { table: &'static str, id: String },
    #[error("Lookup validation error: {0}")]
    ValidationError(String),
    #[error("Lookup backend error: {0}")]
    Backend(FrameworkError),
}

impl From<FrameworkError> for LookupError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { table, id } => LookupError::NotFound { table, id },
            FrameworkError::Rejected { reason, .. } => LookupError::ValidationError(reason),
            other => LookupError::Backend(other),
        }
    }
}
