use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("User {user_id} is not the seller of order {order_id}")]
    NotSeller { order_id: String, user_id: String },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order backend error: {0}")]
    Backend(FrameworkError),
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => OrderError::NotFound(id),
            FrameworkError::Rejected { reason, .. } => OrderError::ValidationError(reason),
            other => OrderError::Backend(other),
        }
    }
}
