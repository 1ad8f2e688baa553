//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::StoreError;
use crate::token::TokenError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: Malformed body, query or field values (400)
/// - **Resource Errors**: Requested account or transfer not found (404)
/// - **Authentication Errors**: Missing or bad token, or the caller does not
///   own the account being acted on (401)
/// - **Internal Errors**: Store or infrastructure failure (500)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Account {0} not found")]
    AccountNotFound(i64),

    #[error("Transfer {0} not found")]
    TransferNotFound(i64),

    /// No `authorization` header on a protected route.
    #[error("Authorization header is not provided")]
    MissingAuthorization,

    /// Header present but not `bearer <token>`.
    #[error("Invalid authorization header format or unsupported authorization type")]
    InvalidAuthorization,

    /// Token failed verification (bad signature, expired, malformed).
    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    /// The authenticated caller does not own the account.
    #[error("Account {0} doesn't belong to the authenticated user")]
    AccountNotOwned(i64),

    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other infrastructure failure. The message is logged, never sent.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::TransferNotFound(_) => (StatusCode::NOT_FOUND, "transfer_not_found"),
            AppError::MissingAuthorization => (StatusCode::UNAUTHORIZED, "missing_authorization"),
            AppError::InvalidAuthorization => (StatusCode::UNAUTHORIZED, "invalid_authorization"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::AccountNotOwned(_) => (StatusCode::UNAUTHORIZED, "account_not_owned"),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::NotFound => AppError::Internal("record vanished during request".to_string()),
            StoreError::Unavailable(msg) => AppError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Internal errors are logged here and replaced by a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
