use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::auth::AuthError;
use crate::lifecycle::UnknownStatus;
use crate::lookup_actor::LookupError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::storage::StorageError;
use crate::user_actor::UserError;

/// How a failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input; raised before any request is sent.
    Validation,
    /// The acting user lacks the role or ownership the operation needs.
    Authorization,
    /// A repository, storage or channel failure.
    Backend,
}

/// Application-level error returned by every marketplace workflow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not allowed: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

impl From<UnknownStatus> for AppError {
    fn from(err: UnknownStatus) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_)
            | AppError::Product(ProductError::ValidationError(_))
            | AppError::Order(OrderError::ValidationError(_))
            | AppError::User(UserError::ValidationError(_) | UserError::AlreadyExists(_))
            | AppError::Lookup(LookupError::ValidationError(_))
            | AppError::Auth(AuthError::Validation(_) | AuthError::EmailTaken(_))
            | AppError::Storage(StorageError::EmptyUpload(_)) => ErrorKind::Validation,
            AppError::Forbidden(_)
            | AppError::Order(OrderError::NotSeller { .. })
            | AppError::Auth(AuthError::InvalidCredentials | AuthError::NotSignedIn) => {
                ErrorKind::Authorization
            }
            _ => ErrorKind::Backend,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::Validation("x".into()).kind(), ErrorKind::Validation);
        let not_seller = OrderError::NotSeller { order_id: "o".into(), user_id: "u".into() };
        assert_eq!(AppError::from(not_seller).kind(), ErrorKind::Authorization);
        assert_eq!(AppError::from(FrameworkError::ActorClosed).kind(), ErrorKind::Backend);
        assert_eq!(AppError::from(ProductError::NotFound("p".into())).kind(), ErrorKind::Backend);
        assert_eq!(AppError::from(UnknownStatus("lost".into())).kind(), ErrorKind::Validation);
    }
}
