//! MongoDB connector, health checks and the document store

mod config;
mod connector;
mod documents;
mod health;

pub use config::{DATABASE_ENV_KEYS, MongoConfig, URL_ENV_KEYS};
pub use connector::{MongoError, client_from_config, connect_from_config, verify_connection};
pub use documents::{DocumentStore, ID_FIELD, MongoDocumentStore};
pub use health::{HealthStatus, check_health_detailed, ping};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Database, bson};
