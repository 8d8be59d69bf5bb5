use std::sync::Arc;

use crate::error::UserError;
use crate::store::UserStore;
use crate::types::{User, UserCandidate};
use crate::validation::validate;

/// The five user operations, independent of how they are invoked.
///
/// Both the Lambda handlers and the in-process client go through this type, so
/// validation and existence rules live in exactly one place.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn get(&self, user_id: &str) -> Result<User, UserError> {
        let user_id = require_id(user_id)?;
        self.store.get(user_id).await?.ok_or(UserError::NotFound)
    }

    pub async fn create(&self, candidate: UserCandidate) -> Result<User, UserError> {
        let input = validate(candidate)?;
        Ok(self.store.create(&input).await?)
    }

    pub async fn update(&self, user_id: &str, candidate: UserCandidate) -> Result<User, UserError> {
        let user_id = require_id(user_id)?;
        let input = validate(candidate)?;

        let existing = self
            .store
            .get(user_id)
            .await?
            .ok_or(UserError::NotFound)?;
        // The document may have been deleted since the check above
        self.store
            .update(user_id, &input, existing.updated_at)
            .await?
            .ok_or(UserError::NotFound)
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), UserError> {
        let user_id = require_id(user_id)?;

        if self.store.get(user_id).await?.is_none() {
            return Err(UserError::NotFound);
        }
        if self.store.delete(user_id).await? {
            Ok(())
        } else {
            Err(UserError::NotFound)
        }
    }
}

fn require_id(user_id: &str) -> Result<&str, UserError> {
    if user_id.is_empty() {
        Err(UserError::MissingId)
    } else {
        Ok(user_id)
    }
}
