use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UserError;

// ========== USER ==========
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update, as received on the wire.
///
/// Both fields are optional here so the validator can say which one is missing.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct UserCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserCandidate {
    /// Parse a raw request body. An empty body is read as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, UserError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| UserError::InvalidBody(e.to_string()))
    }
}

impl From<UserInput> for UserCandidate {
    fn from(input: UserInput) -> Self {
        Self {
            name: Some(input.name),
            email: Some(input.email),
        }
    }
}

/// A `{name, email}` pair that passed validation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
