use async_trait::async_trait;

use crate::error::StorefrontResult;
use crate::models::{Category, ContactMessage, Order, Product, ProductFilter};

/// Repository trait for storefront persistence.
///
/// Reads return at most `limit` records with storage identifiers removed.
/// Writes return the identifier the store assigned, for logging only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontRepository: Send + Sync {
    /// List products, optionally restricted to one category
    async fn list_products(&self, filter: ProductFilter, limit: i64)
    -> StorefrontResult<Vec<Product>>;

    /// List categories
    async fn list_categories(&self, limit: i64) -> StorefrontResult<Vec<Category>>;

    /// Store a contact form submission
    async fn create_contact_message(&self, message: ContactMessage) -> StorefrontResult<String>;

    /// Store an order
    async fn create_order(&self, order: Order) -> StorefrontResult<String>;
}
