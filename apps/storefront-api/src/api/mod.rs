//! API routes module

pub mod health;

use axum::Router;
use database::mongodb::DocumentStore;
use domain_storefront::{DocumentStorefrontRepository, StorefrontService, handlers};
use std::sync::Arc;

use crate::state::AppState;

/// Routes mounted at the root: `/`, `/test`, `/ready`
pub fn root_routes(state: &AppState) -> Router {
    health::root_router(state.clone())
}

/// Routes nested under `/api` by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    let repository =
        DocumentStorefrontRepository::<dyn DocumentStore>::new(Arc::clone(&state.store));
    let service = StorefrontService::new(repository);

    Router::new()
        .merge(health::api_router())
        .merge(handlers::router(service))
}
