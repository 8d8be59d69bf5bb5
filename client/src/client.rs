//! HTTP transport for [`UsersApi`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use userdash_shared::types::{User, UserInput};

use crate::error::{ClientError, Result};
use crate::UsersApi;

/// Calls the deployed user functions over HTTP.
///
/// No timeout is configured beyond what `reqwest` does by default.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Create a client for the functions hosted under `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http_client(base_url, Client::new())
    }

    /// Same as [`UsersClient::new`] but reusing an existing `reqwest::Client`.
    pub fn with_http_client(base_url: &str, http: Client) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, function: &str) -> String {
        format!("{}/{}", self.base_url, function)
    }

    /// Turn a non-success status into a [`ClientError`] carrying the body text.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), message = %message, "Request rejected");
        Err(ClientError::from_status(status.as_u16(), message))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl UsersApi for UsersClient {
    async fn get_all(&self) -> Result<Vec<User>> {
        let url = self.url("getUsers");
        debug!(url = %url, "Fetching users");
        let response = self.http.get(&url).send().await?;
        Self::parse(response).await
    }

    async fn get_by_id(&self, id: &str) -> Result<User> {
        let url = self.url("getUserById");
        debug!(url = %url, id, "Fetching user");
        let response = self.http.get(&url).query(&[("userId", id)]).send().await?;
        Self::parse(response).await
    }

    async fn create(&self, input: &UserInput) -> Result<User> {
        let url = self.url("createUser");
        debug!(url = %url, "Creating user");
        let response = self.http.post(&url).json(input).send().await?;
        Self::parse(response).await
    }

    async fn update(&self, id: &str, input: &UserInput) -> Result<User> {
        let url = self.url("updateUser");
        debug!(url = %url, id, "Updating user");
        let response = self
            .http
            .put(&url)
            .query(&[("userId", id)])
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url("deleteUser");
        debug!(url = %url, id, "Deleting user");
        let response = self
            .http
            .delete(&url)
            .query(&[("userId", id)])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
