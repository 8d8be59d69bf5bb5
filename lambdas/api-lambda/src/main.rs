use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use userdash_shared::config::Config;
use userdash_shared::AppState;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    // Build the store once at startup and share it across invocations
    let config = Config::from_env();
    tracing::info!(
        "Starting user API - table: {} origin: {} store: {:?}",
        config.table_name,
        config.allowed_origin,
        config.store_backend
    );
    let store = config.build_store().await;
    let state = AppState::new(store, config.allowed_origin);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
