use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use super::health::ping;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Error type for MongoDB connection setup
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Build a client from config without talking to the server.
///
/// Fails only when the connection string cannot be parsed. The driver
/// connects lazily on first use.
pub async fn client_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

/// Connect using a MongoConfig and verify the server answers a ping.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(url = %config.redacted_url(), "Attempting to connect to MongoDB");

    let client = client_from_config(config).await?;

    ping(&client.database(config.database()))
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!(database = config.database(), "Successfully connected to MongoDB");
    Ok(client)
}

/// Ping `database` through an existing client, retrying with exponential backoff.
///
/// The client is left untouched on failure, so callers can keep serving with
/// it while the server is away. `None` uses [`RetryConfig::default`]
/// (3 retries from 100ms).
///
/// # Example
/// ```ignore
/// let client = client_from_config(&config).await?;
/// tokio::spawn(async move {
///     if let Err(e) = verify_connection(&client, "shop", None).await {
///         tracing::warn!(error = %e, "MongoDB unreachable");
///     }
/// });
/// ```
pub async fn verify_connection(
    client: &Client,
    database: &str,
    retry_config: Option<RetryConfig>,
) -> Result<(), MongoError> {
    let db = &client.database(database);
    let attempt = move || async move {
        ping(db)
            .await
            .map_err(|e| MongoError::ConnectionFailed(e.to_string()))
    };

    match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await,
        None => retry(attempt).await,
    }
}
