//! JSON API route handlers.
//!
//! API errors render as JSON `{"error": …}` bodies rather than the HTML the
//! page handlers produce; server-side failures are still captured to Sentry
//! on the way out.

pub mod products;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Error type for JSON API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity lookup missed.
    #[error("{0}")]
    NotFound(&'static str),

    /// Request payload failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// Uniqueness constraint violated.
    #[error("{0}")]
    Conflict(String),

    /// Persistence layer failed.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Map a repository failure, using `message` for the internal-error body
    /// so the client sees "Failed to fetch products" rather than SQL detail.
    pub fn from_repository(err: RepositoryError, message: &'static str) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Product not found"),
            RepositoryError::Conflict(detail) => Self::Conflict(detail),
            other => {
                let event_id = sentry::capture_error(&other);
                tracing::error!(
                    error = %other,
                    sentry_event_id = %event_id,
                    "API repository error"
                );
                Self::Internal(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("Product not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_repository_conflict_maps_to_409() {
        let err = ApiError::from_repository(
            RepositoryError::Conflict("slug already exists".to_owned()),
            "Failed to create product",
        );
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_repository_corruption_maps_to_500() {
        let err = ApiError::from_repository(
            RepositoryError::DataCorruption("bad tag".to_owned()),
            "Failed to fetch products",
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
