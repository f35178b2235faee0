//! In-process document store for handler and repository tests.

use async_trait::async_trait;
use database::mongodb::{DocumentStore, HealthStatus, ID_FIELD};
use database::{DatabaseError, DatabaseResult};
use mongodb::bson::{Bson, Document, oid::ObjectId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// [`DocumentStore`] holding collections in memory.
///
/// Inserted documents get a fresh `_id` ObjectId, exactly like MongoDB.
/// Reads apply equality filters and the limit, returning documents in
/// insertion order. A store built with [`InMemoryDocumentStore::failing`]
/// rejects every call, standing in for an unreachable server.
///
/// Clones share the same collections.
#[derive(Clone, Debug)]
pub struct InMemoryDocumentStore {
    database_name: String,
    collections: Arc<Mutex<BTreeMap<String, Vec<Document>>>>,
    failure: Option<String>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_database_name("test")
    }

    pub fn with_database_name(name: impl Into<String>) -> Self {
        Self {
            database_name: name.into(),
            collections: Arc::default(),
            failure: None,
        }
    }

    /// A store whose every operation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Seed a collection, assigning identifiers as an insert would.
    pub fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self.lock();
        let stored = collections.entry(collection.to_string()).or_default();
        stored.extend(documents.into_iter().map(with_object_id));
    }

    /// Snapshot of everything stored in `collection`, identifiers included.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    fn check_available(&self) -> DatabaseResult<()> {
        match &self.failure {
            Some(message) => Err(DatabaseError::ConnectionFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<Document>>> {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn with_object_id(mut document: Document) -> Document {
    if !document.contains_key(ID_FIELD) {
        let mut stored = Document::new();
        stored.insert(ID_FIELD, ObjectId::new());
        stored.extend(document);
        document = stored;
    }
    document
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn database_name(&self) -> String {
        self.database_name.clone()
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> DatabaseResult<Vec<Document>> {
        self.check_available()?;

        let limit = usize::try_from(limit).unwrap_or(0);
        let collections = self.lock();
        let found = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, &filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(found)
    }

    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> DatabaseResult<String> {
        self.check_available()?;

        let stored = with_object_id(document);
        let id = match stored.get(ID_FIELD) {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        self.lock()
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(id)
    }

    async fn list_collection_names(&self) -> DatabaseResult<Vec<String>> {
        self.check_available()?;
        Ok(self.lock().keys().cloned().collect())
    }

    async fn health(&self) -> HealthStatus {
        HealthStatus {
            healthy: self.failure.is_none(),
            message: self.failure.clone(),
            response_time_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_create_assigns_object_id() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .create_document("order", doc! { "total": 10.0 })
            .await
            .unwrap();

        let stored = store.documents("order");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].get_object_id(ID_FIELD).unwrap().to_hex(), id);
    }

    #[tokio::test]
    async fn test_filter_and_limit() {
        let store = InMemoryDocumentStore::new();
        store.seed(
            "product",
            (0..5).map(|i| {
                let category = if i % 2 == 0 { "even" } else { "odd" };
                doc! { "n": i, "category": category }
            }),
        );

        let even = store
            .get_documents("product", doc! { "category": "even" }, 50)
            .await
            .unwrap();
        assert_eq!(even.len(), 3);

        let limited = store.get_documents("product", doc! {}, 2).await.unwrap();
        assert_eq!(limited.len(), 2);

        let none = store.get_documents("product", doc! {}, 0).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = InMemoryDocumentStore::new();
        let found = store.get_documents("category", doc! {}, 50).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_rejects_everything() {
        let store = InMemoryDocumentStore::failing("connection refused");

        assert!(store.get_documents("product", doc! {}, 50).await.is_err());
        assert!(store.create_document("order", doc! {}).await.is_err());
        assert!(store.list_collection_names().await.is_err());
        assert!(!store.health().await.healthy);
    }

    #[tokio::test]
    async fn test_clones_share_collections() {
        let store = InMemoryDocumentStore::new();
        let clone = store.clone();
        clone.create_document("category", doc! { "name": "Books" }).await.unwrap();

        assert_eq!(store.list_collection_names().await.unwrap(), vec!["category"]);
    }
}
