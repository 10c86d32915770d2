use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Product backend error: {0}")]
    Backend(FrameworkError),
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => ProductError::NotFound(id),
            FrameworkError::Rejected { reason, .. } => ProductError::ValidationError(reason),
            other => ProductError::Backend(other),
        }
    }
}
