use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use users_core::error::CoreError;
use users_db::PersistenceError;

use crate::response::MessageResponse;

/// Message returned for failures whose details must not reach the client.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`PersistenceError`] for storage
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce a `{ "message": ... }` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `users_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure from the persistence gateway.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A request whose body or path could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GENERIC_INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // The composed "<operation prefix>: <cause>" text is part of the
            // API contract and is returned as-is.
            AppError::Persistence(err) => {
                tracing::error!(operation = ?err.operation, error = %err, "Persistence error");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
