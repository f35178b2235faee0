//! Storefront Domain
//!
//! Products, categories, contact messages and checkout orders for the
//! storefront API, stored as documents through [`database::mongodb::DocumentStore`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /api
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Input validation, order assembly
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + DocumentStore implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, request DTOs, constraints
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::mongodb::{Client, DocumentStore, MongoDocumentStore};
//! use domain_storefront::{DocumentStorefrontRepository, StorefrontService, handlers};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let store: Arc<dyn DocumentStore> = Arc::new(MongoDocumentStore::new(client.database("shop")));
//!
//! let repository = DocumentStorefrontRepository::new(store);
//! let router = handlers::router(StorefrontService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use document::DocumentStorefrontRepository;
pub use error::{StorefrontError, StorefrontResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, CheckoutResponse, ContactMessage, ContactResponse, CreateContact, CreateOrder,
    LIST_LIMIT, Order, OrderItem, OrderStatus, Product, ProductFilter, User,
};
pub use repository::StorefrontRepository;
pub use service::StorefrontService;
