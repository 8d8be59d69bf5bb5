//! Error types for the user API client.

use thiserror::Error;
use userdash_shared::error::UserError;

/// Errors returned by a [`UsersApi`](crate::UsersApi) call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The requested user does not exist
    #[error("User not found")]
    NotFound,

    /// The request was rejected (missing id, missing name or email)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Failed to parse a success response
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => ClientError::NotFound,
            400 => ClientError::BadRequest(message),
            _ => ClientError::Server { status, message },
        }
    }
}

impl From<UserError> for ClientError {
    fn from(err: UserError) -> Self {
        ClientError::from_status(err.status().as_u16(), err.public_message().to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
