//! Shared application state passed to the root handlers.

use database::mongodb::DocumentStore;
use std::sync::Arc;

/// Cloned per handler; clones share the store and its connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Storage handle opened at startup and kept for the process lifetime
    pub store: Arc<dyn DocumentStore>,
}
