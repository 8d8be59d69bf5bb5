use lambda_http::http::StatusCode;
use thiserror::Error;

/// A required field of the user payload is absent or empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Failure reported by a document store adapter.
///
/// The message is for logs only and never reaches a caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Backend(String),
    #[error("malformed document {id}: {reason}")]
    Malformed { id: String, reason: String },
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user id is required")]
    MissingId,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::MissingId | UserError::InvalidBody(_) | UserError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            UserError::MissingId => "User ID is required",
            UserError::InvalidBody(_) => "Invalid request body",
            UserError::Validation(_) => "Name and email are required",
            UserError::NotFound => "User not found",
            UserError::Store(_) => "Internal server error",
        }
    }
}
