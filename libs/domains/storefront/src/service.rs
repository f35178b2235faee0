//! Storefront Service - Business logic layer

use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{
    Category, ContactMessage, CreateContact, CreateOrder, LIST_LIMIT, Order, OrderItem,
    OrderStatus, Product, ProductFilter,
};
use crate::repository::StorefrontRepository;

/// Storefront service providing the catalogue, contact and checkout operations.
pub struct StorefrontService<R: StorefrontRepository> {
    repository: Arc<R>,
}

impl<R: StorefrontRepository> StorefrontService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List up to [`LIST_LIMIT`] products
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> StorefrontResult<Vec<Product>> {
        self.repository.list_products(filter, LIST_LIMIT).await
    }

    /// List up to [`LIST_LIMIT`] categories
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> StorefrontResult<Vec<Category>> {
        self.repository.list_categories(LIST_LIMIT).await
    }

    /// Validate and store a contact form submission
    #[instrument(skip(self, input), fields(subject = %input.subject))]
    pub async fn submit_contact(&self, input: CreateContact) -> StorefrontResult<()> {
        input.validate()?;

        let message = ContactMessage::from(input);
        self.repository.create_contact_message(message).await?;
        Ok(())
    }

    /// Record a paid order.
    ///
    /// Each item must decode as an [`OrderItem`]; the assembled order is then
    /// validated as a whole. Nothing is written unless both steps pass, and
    /// every call stores a new order.
    #[instrument(skip(self, input), fields(items = input.items.len(), total = input.total))]
    pub async fn checkout(&self, input: CreateOrder) -> StorefrontResult<Order> {
        input.validate()?;

        let items = input
            .items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value::<OrderItem>(raw).map_err(|e| {
                    StorefrontError::InvalidOrderItem {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<StorefrontResult<Vec<_>>>()?;

        let order = Order {
            items,
            total: input.total,
            currency: input.currency,
            status: OrderStatus::Paid,
            customer_email: input.customer_email,
        };
        order.validate()?;

        let id = self.repository.create_order(order.clone()).await?;
        info!(order_id = %id, status = %order.status, "Order recorded");
        Ok(order)
    }
}
