/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Request validation failures and other conditions a handler reports with
 * an explicit status code (400, 401, 409, ...).
 *
 * ## Authentication Errors
 *
 * Every identity-resolution failure (missing token, bad token, expired
 * token, unknown subject) is reported as 401 with one generic message, so a
 * client cannot tell which check failed or whether an account exists.
 *
 * ## Store Errors
 *
 * Database failures are reported as 500 without exposing driver messages.
 * Uniqueness conflicts are reported as 409.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::auth::resolver::AuthError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::StoreError;

/// Generic message for every authentication failure
pub const UNAUTHORIZED_MESSAGE: &str = "Could not validate credentials";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use brainbridge::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request body, duplicate account)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Identity could not be resolved from the presented credentials
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// User store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Token could not be signed
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 401 with a specific message
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Auth` - 401, except store failures during lookup (500)
    /// - `Store` - 409 for conflicts, otherwise 500
    /// - `Token` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(AuthError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal details (driver errors, which auth check failed) are not
    /// included; they are logged where the error is raised.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(AuthError::Store(_)) => "Internal server error".to_string(),
            Self::Auth(_) => UNAUTHORIZED_MESSAGE.to_string(),
            Self::Store(StoreError::Conflict(message)) => message.clone(),
            Self::Store(_) | Self::Token(_) => "Internal server error".to_string(),
        }
    }
}
