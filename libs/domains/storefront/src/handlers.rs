use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, ValidationErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StorefrontResult;
use crate::models::{
    Category, CheckoutResponse, ContactResponse, CreateContact, CreateOrder, OrderItem,
    OrderStatus, Product, ProductFilter,
};
use crate::repository::StorefrontRepository;
use crate::service::StorefrontService;

/// OpenAPI documentation for the storefront endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_products, list_categories, submit_contact, checkout),
    components(
        schemas(
            Product,
            Category,
            OrderItem,
            OrderStatus,
            CreateContact,
            CreateOrder,
            ContactResponse,
            CheckoutResponse
        ),
        responses(
            BadRequestResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Storefront", description = "Catalogue, contact form and checkout")
    )
)]
pub struct ApiDoc;

/// Create the storefront router. Mount it under `/api`.
pub fn router<R: StorefrontRepository + 'static>(service: StorefrontService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products))
        .route("/categories", get(list_categories))
        .route("/contact", post(submit_contact))
        .route("/checkout", post(checkout))
        .with_state(shared_service)
}

/// List products, optionally by category
#[utoipa::path(
    get,
    path = "/products",
    tag = "Storefront",
    params(ProductFilter),
    responses(
        (status = 200, description = "Up to 50 products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: StorefrontRepository>(
    State(service): State<Arc<StorefrontService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> StorefrontResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Storefront",
    responses(
        (status = 200, description = "Up to 50 categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: StorefrontRepository>(
    State(service): State<Arc<StorefrontService<R>>>,
) -> StorefrontResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/contact",
    tag = "Storefront",
    request_body = CreateContact,
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn submit_contact<R: StorefrontRepository>(
    State(service): State<Arc<StorefrontService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateContact>,
) -> StorefrontResult<Json<ContactResponse>> {
    service.submit_contact(input).await?;
    Ok(Json(ContactResponse { success: true }))
}

/// Record a paid order
#[utoipa::path(
    post,
    path = "/checkout",
    tag = "Storefront",
    request_body = CreateOrder,
    responses(
        (status = 200, description = "Order recorded", body = CheckoutResponse),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn checkout<R: StorefrontRepository>(
    State(service): State<Arc<StorefrontService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> StorefrontResult<Json<CheckoutResponse>> {
    let order = service.checkout(input).await?;
    Ok(Json(CheckoutResponse {
        success: true,
        status: order.status,
    }))
}
