use async_trait::async_trait;
use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::error::StoreError;
use crate::types::{User, UserInput};

/// Collection every user document lives in.
pub const USERS_COLLECTION: &str = "users";

/// Document store holding user records.
///
/// Adapters assign ids and timestamps themselves; callers never supply them.
/// `update` and `delete` must only touch a document that still exists at write
/// time and report `None`/`false` otherwise.
///
/// `update` receives the `updated_at` the caller last read so the new stamp can
/// be placed after it even when this instance's clock lags the writer's.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id.
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new document under a freshly generated id.
    async fn create(&self, input: &UserInput) -> Result<User, StoreError>;

    /// Merge `name`, `email` and a new `updated_at` into an existing document.
    async fn update(
        &self,
        id: &str,
        input: &UserInput,
        previous_updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Current time truncated to milliseconds, the precision documents are stored at.
pub fn server_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(Duration::milliseconds(1)).unwrap_or(now)
}

/// A timestamp strictly after `previous`, normally just `server_timestamp()`.
pub fn server_timestamp_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    timestamp_after(previous, server_timestamp())
}

fn timestamp_after(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + Duration::milliseconds(1))
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
