//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use vastra_core::Error as CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and adds the HTTP-only cases. Every variant renders
/// as `{"detail": "<message>"}`, the shape the frontend reads.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// A feature whose backing service has no credentials.
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The 503 every LLM-only route returns without a configured provider.
    pub fn no_llm() -> Self {
        Self::Unavailable("No LLM provider configured".into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Image(msg) => (StatusCode::BAD_REQUEST, format!("Invalid image: {}", msg)),
                other => {
                    error!(error = %other, "Request failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_message();
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_message() {
        let (status, msg) =
            AppError::from(CoreError::Validation("APIFY_API_KEY not set in .env file".into()))
                .status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "APIFY_API_KEY not set in .env file");

        let (status, msg) = AppError::from(CoreError::NotFound("Bookmark not found".into())).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "Bookmark not found");
    }

    #[test]
    fn test_upstream_is_server_error() {
        let (status, msg) = AppError::from(CoreError::Upstream("SDXL returned 500".into())).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Upstream error: SDXL returned 500");
    }

    #[test]
    fn test_no_llm_is_unavailable() {
        let (status, msg) = AppError::no_llm().status_and_message();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(msg, "No LLM provider configured");
    }
}
