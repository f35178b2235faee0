use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A checkout line that is not shaped like an order item.
    #[error("Invalid order item at index {index}: {reason}")]
    InvalidOrderItem { index: usize, reason: String },

    #[error(transparent)]
    Storage(#[from] DatabaseError),

    /// A stored document that no longer matches its record type.
    #[error("Invalid document in '{collection}': {reason}")]
    InvalidDocument {
        collection: &'static str,
        reason: String,
    },

    #[error("Failed to encode {collection} document: {reason}")]
    Encoding {
        collection: &'static str,
        reason: String,
    },
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;

impl From<StorefrontError> for AppError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Validation(errors) => AppError::ValidationError(errors),
            StorefrontError::InvalidOrderItem { index, reason } => {
                let field = format!("items[{}]", index);
                AppError::UnprocessableEntity {
                    message: "Request validation failed".to_string(),
                    details: Some(json!({
                        field: [{ "code": "order_item", "message": reason, "params": {} }]
                    })),
                }
            }
            StorefrontError::Storage(e) => AppError::DatabaseError(e.to_string()),
            e @ (StorefrontError::InvalidDocument { .. } | StorefrontError::Encoding { .. }) => {
                AppError::InternalServerError(e.to_string())
            }
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
