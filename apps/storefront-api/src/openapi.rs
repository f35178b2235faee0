//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::health;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Catalogue, contact form and checkout backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(health::root, health::hello, health::diagnostics, health::readiness),
    components(schemas(
        health::MessageResponse,
        health::DiagnosticsResponse,
        health::ReadyResponse
    )),
    nest(
        (path = "/api", api = domain_storefront::ApiDoc)
    ),
    tags(
        (name = "Storefront", description = "Catalogue, contact form and checkout"),
        (name = "Health", description = "Liveness and diagnostics")
    )
)]
pub struct ApiDoc;
