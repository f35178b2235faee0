//! Database library providing MongoDB connectivity and a generic document store.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health checks and [`mongodb::DocumentStore`]
//! - `config` - `MongoConfig::from_env` via `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, DocumentStore, MongoConfig, MongoDocumentStore};
//! use mongodb::bson::doc;
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
//! let client = mongodb::connect_from_config(&config).await?;
//! let store = MongoDocumentStore::new(client.database(config.database()));
//!
//! let products = store.get_documents("product", doc! {}, 50).await?;
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
