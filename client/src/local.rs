//! In-process transport for [`UsersApi`].

use async_trait::async_trait;
use userdash_shared::service::UserService;
use userdash_shared::types::{User, UserInput};

use crate::error::Result;
use crate::UsersApi;

/// Calls a [`UserService`] directly instead of going over the network.
#[derive(Clone)]
pub struct LocalUsers {
    service: UserService,
}

impl LocalUsers {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersApi for LocalUsers {
    async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.service.list().await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<User> {
        Ok(self.service.get(id).await?)
    }

    async fn create(&self, input: &UserInput) -> Result<User> {
        Ok(self.service.create(input.clone().into()).await?)
    }

    async fn update(&self, id: &str, input: &UserInput) -> Result<User> {
        Ok(self.service.update(id, input.clone().into()).await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Ok(self.service.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use std::sync::Arc;
    use userdash_shared::memory::InMemoryUserStore;

    fn local() -> LocalUsers {
        LocalUsers::new(UserService::new(Arc::new(InMemoryUserStore::new())))
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let api = local();
        assert!(api.get_all().await.unwrap().is_empty());

        let ada = api.create(&UserInput::new("Ada", "ada@x.io")).await.unwrap();
        let updated = api
            .update(&ada.id, &UserInput::new("Ada L.", "ada@x.io"))
            .await
            .unwrap();
        assert!(updated.updated_at > ada.created_at);
        assert_eq!(api.get_by_id(&ada.id).await.unwrap(), updated);

        api.delete(&ada.id).await.unwrap();
        assert!(matches!(
            api.get_by_id(&ada.id).await,
            Err(ClientError::NotFound)
        ));
    }

    #[tokio::test]
    async fn rejections_match_http_transport() {
        let api = local();

        match api.create(&UserInput::new("", "ada@x.io")).await {
            Err(ClientError::BadRequest(msg)) => assert_eq!(msg, "Name and email are required"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
        match api.delete("").await {
            Err(ClientError::BadRequest(msg)) => assert_eq!(msg, "User ID is required"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }
}
