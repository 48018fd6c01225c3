use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error types for the round-up savings API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Request body must be an object")]
    BodyNotObject,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Not found")]
    NotFound { path: String },
}

impl ApiError {
    pub fn validation(field: &str, message: &str) -> Self {
        ApiError::ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::ValidationError { field, .. } => {
                tracing::debug!(field = %field, "rejected request: {self}");
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }

            ApiError::BodyNotObject | ApiError::MalformedBody(_) => {
                tracing::debug!("rejected request: {self}");
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }

            ApiError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.to_string(), "path": path }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Helper type for API results
pub type ApiResult<T> = Result<T, ApiError>;
