//! Generic data access over named collections.
//!
//! [`DocumentStore`] is the only way request handlers reach storage. It
//! exposes equality-filtered reads and single-document inserts; there are no
//! updates, deletes, transactions or retries.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Database,
    bson::{Bson, Document},
};
use tracing::instrument;

use super::health::{HealthStatus, check_health_detailed};
use crate::common::DatabaseResult;

/// Field the storage engine uses for its own document identifier.
pub const ID_FIELD: &str = "_id";

/// Persistence over named collections of schemaless documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the database backing this store
    fn database_name(&self) -> String;

    /// Fetch up to `limit` documents whose fields equal every pair in `filter`.
    ///
    /// An empty filter matches everything. Order is whatever the engine returns.
    /// A non-positive `limit` yields no documents.
    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> DatabaseResult<Vec<Document>>;

    /// Insert one document and return the identifier the engine assigned to it.
    async fn create_document(&self, collection: &str, document: Document)
    -> DatabaseResult<String>;

    /// Names of the collections in the database
    async fn list_collection_names(&self) -> DatabaseResult<Vec<String>>;

    /// Round-trip check against the server
    async fn health(&self) -> HealthStatus;
}

/// [`DocumentStore`] backed by a MongoDB database handle.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    fn database_name(&self) -> String {
        self.db.name().to_string()
    }

    #[instrument(skip(self, filter), fields(db.collection = collection))]
    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> DatabaseResult<Vec<Document>> {
        // The driver treats 0 as "no limit" and negatives as a single batch
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(filter)
            .limit(limit)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        tracing::debug!(count = documents.len(), "Documents fetched");
        Ok(documents)
    }

    #[instrument(skip(self, document), fields(db.collection = collection))]
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> DatabaseResult<String> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };

        tracing::info!(document_id = %id, "Document created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_collection_names(&self) -> DatabaseResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }

    async fn health(&self) -> HealthStatus {
        check_health_detailed(&self.db).await
    }
}
