//! Liveness, readiness and diagnostic endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use database::mongodb::{DATABASE_ENV_KEYS, URL_ENV_KEYS};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Collections reported by the diagnostic probe
const MAX_COLLECTIONS: usize = 10;
/// Error messages in the diagnostic probe are cut to this many characters
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Diagnostic snapshot of the backend and its database
#[derive(Debug, Serialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub backend: &'static str,
    pub database: String,
    /// Whether a connection string was provided in the environment
    pub database_url: &'static str,
    /// Whether a database name was provided in the environment
    pub database_name: &'static str,
    pub connection_status: &'static str,
    /// First few collection names
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub database: String,
    pub mongodb: bool,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn root_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
        .route("/ready", get(readiness))
        .with_state(state)
}

pub fn api_router() -> Router {
    Router::new().route("/hello", get(hello))
}

/// Liveness message
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "E-Commerce Backend Running",
    })
}

/// Liveness message under the API prefix
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Health",
    responses((status = 200, body = MessageResponse))
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}

/// Database diagnostics. Always answers 200; failures are described in the body.
#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses((status = 200, body = DiagnosticsResponse))
)]
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let (database, collections) = match state.store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            ("✅ Connected & Working".to_string(), names)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Diagnostic collection listing failed");
            let reason = truncate_chars(&e.to_string(), MAX_ERROR_CHARS);
            (format!("⚠️  Connected but Error: {}", reason), Vec::new())
        }
    };

    Json(DiagnosticsResponse {
        backend: "✅ Running",
        database,
        database_url: set_marker(URL_ENV_KEYS),
        database_name: set_marker(DATABASE_ENV_KEYS),
        connection_status: "Connected",
        collections,
    })
}

/// Readiness: 200 when the database answers a ping, 503 otherwise
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, body = ReadyResponse),
        (status = 503, body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> Response {
    let health = state.store.health().await;
    let status = if health.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ReadyResponse {
        status: if health.healthy { "ready" } else { "unhealthy" },
        database: state.store.database_name(),
        mongodb: health.healthy,
        response_time_ms: health.response_time_ms,
        error: health.message,
    };

    (status, Json(body)).into_response()
}

fn set_marker(keys: &[&str]) -> &'static str {
    let any_set = keys
        .iter()
        .any(|key| std::env::var(key).is_ok_and(|value| !value.is_empty()));

    if any_set { "✅ Set" } else { "❌ Not Set" }
}

fn truncate_chars(message: &str, max: usize) -> String {
    message.chars().take(max).collect()
}
