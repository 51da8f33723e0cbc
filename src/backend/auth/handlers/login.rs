/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using Argon2
 * 3. Issue an access/refresh token pair for the email
 *
 * # Security
 *
 * - An unknown email and a wrong password produce the same 401
 * - User passwords are never returned in responses or logged
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, TokenPair};
use crate::backend::auth::password;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;

pub const INVALID_CREDENTIALS: &str = "Incorrect email or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token signing fails
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(store): State<Arc<dyn UserStore>>,
    State(tokens): State<TokenService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPair>, BackendError> {
    tracing::info!("Login request for: {}", request.email);

    let Some(user) = store.find_by_email(&request.email).await? else {
        tracing::warn!("User not found: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    if !password::verify(&request.password, &user.password_hash) {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let pair = tokens.issue_pair(&user.email)?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(pair))
}
