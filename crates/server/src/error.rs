//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; failure bodies are always `{ "error": ... }` JSON.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use shoplite_core::ErrorResponse;

use crate::db::RepositoryError;

/// Application-level error type for the verification service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Request failed validation (empty cart, missing customer fields).
    #[error("{0}")]
    Validation(String),

    /// A requested line references a product the catalog does not have.
    /// The whole order is rejected; the payload is the offending id.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(RepositoryError::Database(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::UnknownProduct(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
