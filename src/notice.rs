//! Dismissible notices shown after an operation finishes.

use serde::Serialize;

use crate::error::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new("Success", description)
    }

    pub fn from_error(err: &AppError) -> Self {
        let title = match err.kind() {
            ErrorKind::Authorization => "Not Allowed",
            ErrorKind::Validation | ErrorKind::Backend => "Error",
        };
        Self {
            title: title.to_string(),
            description: err.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// Notice for either outcome of an operation.
    pub fn for_result<T>(result: &Result<T, AppError>, success: impl Into<String>) -> Self {
        match result {
            Ok(_) => Self::success(success),
            Err(err) => Self::from_error(err),
        }
    }
}
