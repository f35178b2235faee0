//! Shared test utilities for domain testing
//!
//! - `InMemoryDocumentStore`: a `DocumentStore` kept in process memory, with
//!   the same filter and limit semantics as MongoDB, plus a failing mode
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::DocumentStore;
//! use test_utils::{InMemoryDocumentStore, TestDataBuilder};
//!
//! # async fn example() {
//! let store = InMemoryDocumentStore::new();
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let email = builder.email("buyer");
//! let products = store.get_documents("product", Default::default(), 50).await.unwrap();
//! # }
//! ```

mod memory;
mod mongo;

pub use memory::InMemoryDocumentStore;
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving values from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_checkout");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "lamp"), "test-product-7-lamp");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Generate a syntactically valid, unique email address
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed)
    }

    /// Generate a product reference in the shape the storage engine uses (24 hex chars)
    pub fn product_id(&self, index: u32) -> String {
        format!("{:016x}{:08x}", self.seed, index)
    }

    /// Name of a throwaway database for container-backed tests
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.email("buyer"), builder2.email("buyer"));
        assert_eq!(
            builder1.name("product", "test"),
            builder2.name("product", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.email("buyer"), builder2.email("buyer"));
    }

    #[test]
    fn test_product_id_shape() {
        let id = TestDataBuilder::new(u64::MAX).product_id(3);
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
