use std::env;
use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoClient;

use crate::dynamo::DynamoUserStore;
use crate::memory::InMemoryUserStore;
use crate::store::{UserStore, USERS_COLLECTION};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "dynamo" => Some(StoreBackend::DynamoDb),
            "memory" | "in-memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

/// Settings read once at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub allowed_origin: String,
    pub store_backend: StoreBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: USERS_COLLECTION.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            store_backend: StoreBackend::DynamoDb,
        }
    }
}

impl Config {
    /// `TABLE_NAME`, `ALLOWED_ORIGIN` and `USER_STORE` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let store_backend = match lookup("USER_STORE") {
            Some(raw) => StoreBackend::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown USER_STORE value {:?}, using dynamodb", raw);
                StoreBackend::DynamoDb
            }),
            None => defaults.store_backend,
        };

        Self {
            table_name: lookup("TABLE_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.table_name),
            allowed_origin: lookup("ALLOWED_ORIGIN")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.allowed_origin),
            store_backend,
        }
    }

    /// Build the configured store. AWS settings are only loaded for DynamoDB.
    pub async fn build_store(&self) -> Arc<dyn UserStore> {
        match self.store_backend {
            StoreBackend::DynamoDb => {
                let aws_config = aws_config::load_from_env().await;
                Arc::new(DynamoUserStore::new(
                    DynamoClient::new(&aws_config),
                    self.table_name.clone(),
                ))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory user store; data is lost on restart");
                Arc::new(InMemoryUserStore::new())
            }
        }
    }
}
