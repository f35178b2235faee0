//! [`StorefrontRepository`] on top of the generic [`DocumentStore`].

use async_trait::async_trait;
use database::mongodb::{
    DocumentStore, ID_FIELD,
    bson::{self, Document, doc},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{
    CATEGORY_COLLECTION, CONTACT_COLLECTION, Category, ContactMessage, ORDER_COLLECTION, Order,
    PRODUCT_COLLECTION, Product, ProductFilter,
};
use crate::repository::StorefrontRepository;

/// Storefront repository backed by any [`DocumentStore`].
///
/// # Example
/// ```ignore
/// let store: Arc<dyn DocumentStore> = Arc::new(MongoDocumentStore::new(db));
/// let repo = DocumentStorefrontRepository::new(store);
/// ```
pub struct DocumentStorefrontRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: DocumentStore + ?Sized> DocumentStorefrontRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        // An empty `?category=` lists everything
        if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
            doc.insert("category", category);
        }

        doc
    }

    async fn read<T>(
        &self,
        collection: &'static str,
        filter: Document,
        limit: i64,
    ) -> StorefrontResult<Vec<T>>
    where
        T: DeserializeOwned + Validate,
    {
        self.store
            .get_documents(collection, filter, limit)
            .await?
            .into_iter()
            .map(|document| decode(collection, document))
            .collect()
    }

    async fn write<T: Serialize>(
        &self,
        collection: &'static str,
        record: &T,
    ) -> StorefrontResult<String> {
        let document = bson::to_document(record).map_err(|e| StorefrontError::Encoding {
            collection,
            reason: e.to_string(),
        })?;

        let id = self.store.create_document(collection, document).await?;
        info!(collection, id = %id, "Document created");
        Ok(id)
    }
}

/// Strip the storage identifier, decode and re-check constraints.
fn decode<T>(collection: &'static str, mut document: Document) -> StorefrontResult<T>
where
    T: DeserializeOwned + Validate,
{
    document.remove(ID_FIELD);

    let record: T =
        bson::from_document(document).map_err(|e| StorefrontError::InvalidDocument {
            collection,
            reason: e.to_string(),
        })?;

    record
        .validate()
        .map_err(|e| StorefrontError::InvalidDocument {
            collection,
            reason: e.to_string(),
        })?;

    Ok(record)
}

#[async_trait]
impl<S> StorefrontRepository for DocumentStorefrontRepository<S>
where
    S: DocumentStore + ?Sized + 'static,
{
    #[instrument(skip(self))]
    async fn list_products(
        &self,
        filter: ProductFilter,
        limit: i64,
    ) -> StorefrontResult<Vec<Product>> {
        let query = Self::build_filter(&filter);
        self.read(PRODUCT_COLLECTION, query, limit).await
    }

    #[instrument(skip(self))]
    async fn list_categories(&self, limit: i64) -> StorefrontResult<Vec<Category>> {
        self.read(CATEGORY_COLLECTION, doc! {}, limit).await
    }

    #[instrument(skip(self, message))]
    async fn create_contact_message(&self, message: ContactMessage) -> StorefrontResult<String> {
        self.write(CONTACT_COLLECTION, &message).await
    }

    #[instrument(skip(self, order), fields(items = order.items.len(), total = order.total))]
    async fn create_order(&self, order: Order) -> StorefrontResult<String> {
        self.write(ORDER_COLLECTION, &order).await
    }
}
