use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{generate_id, server_timestamp, server_timestamp_after, UserStore};
use crate::types::{User, UserInput};

/// Process-local user store.
///
/// Used for local runs (`USER_STORE=memory`) and as a test double. Documents are
/// kept in id order, like a document store listing.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, input: &UserInput) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        let mut id = generate_id();
        while users.contains_key(&id) {
            id = generate_id();
        }

        let now = server_timestamp();
        let user = User {
            id: id.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: &str,
        input: &UserInput,
        previous_updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };

        user.name = input.name.clone();
        user.email = input.email.clone();
        user.updated_at = server_timestamp_after(previous_updated_at.max(user.updated_at));
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(id).is_some())
    }
}
