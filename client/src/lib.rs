//! Typed client facade for the user management functions.
//!
//! [`UsersApi`] has one method per function. Two transports implement it:
//!
//! - [`UsersClient`] calls the deployed functions over HTTP.
//! - [`LocalUsers`] calls a [`UserService`](userdash_shared::service::UserService)
//!   in process, with the same validation and store rules.
//!
//! Neither retries, caches or deduplicates requests.
//!
//! # Example
//!
//! ```ignore
//! use userdash_client::{UsersApi, UsersClient};
//! use userdash_shared::types::UserInput;
//!
//! let client = UsersClient::new("https://us-central1-example.cloudfunctions.net")?;
//! let ada = client.create(&UserInput::new("Ada", "ada@x.io")).await?;
//! let all = client.get_all().await?;
//! client.delete(&ada.id).await?;
//! ```

mod client;
mod error;
mod local;

use async_trait::async_trait;
use userdash_shared::types::{User, UserInput};

pub use client::UsersClient;
pub use error::{ClientError, Result};
pub use local::LocalUsers;

/// One call per user function.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>>;

    async fn get_by_id(&self, id: &str) -> Result<User>;

    async fn create(&self, input: &UserInput) -> Result<User>;

    async fn update(&self, id: &str, input: &UserInput) -> Result<User>;

    async fn delete(&self, id: &str) -> Result<()>;
}
