use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{
    Client, DocumentStore, MongoDocumentStore, client_from_config, verify_connection,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    // The client connects lazily, so the listener binds straight away. An
    // unreachable server only shows up in the logs and in /test and /ready.
    // A malformed connection string is fatal.
    let mongo_client = client_from_config(&config.mongodb).await?;
    spawn_connection_check(mongo_client.clone(), config.mongodb.database().to_string());

    let db = mongo_client.database(config.mongodb.database());
    let store: Arc<dyn DocumentStore> = Arc::new(MongoDocumentStore::new(db));

    let state = AppState { config, store };

    let root_routes = api::root_routes(&state).merge(health_router(state.config.app));
    let api_routes = api::routes(&state);

    let app = create_router::<openapi::ApiDoc>(root_routes, api_routes)?;

    info!("Starting Storefront API with production-ready shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Storefront API shutdown complete");
    Ok(())
}

/// Ping MongoDB in the background and log the outcome.
fn spawn_connection_check(client: Client, database: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match verify_connection(&client, &database, None).await {
            Ok(()) => info!("Successfully connected to MongoDB database: {}", database),
            Err(e) => warn!(error = %e, "MongoDB unreachable, serving in degraded mode"),
        }
    })
}
