pub mod config;
pub mod cors;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;
pub mod users;
pub mod validation;

use cors::CorsPolicy;
use service::UserService;
use std::sync::Arc;
use store::UserStore;

/// Shared application state, built once per cold start
pub struct AppState {
    pub users: UserService,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, allowed_origin: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            users: UserService::new(store),
            cors: CorsPolicy::new(allowed_origin),
        })
    }
}
