/**
 * Register Handler
 *
 * This module implements the registration handler for POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate the request fields
 * 2. Reject a taken email or username (409)
 * 3. Hash the password with Argon2
 * 4. Insert the user and return its projection (201)
 *
 * The store enforces uniqueness as well, so two concurrent registrations
 * for the same email still end in one 201 and one 409.
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::password;
use crate::backend::auth::users::{NewUser, StoreError, UserStore, EMAIL_TAKEN, USERNAME_TAKEN};
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - A field fails validation
/// * `409 Conflict` - Email or username already taken
/// * `500 Internal Server Error` - Hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "password123",
///   "display_name": "Alice"
/// }
/// ```
pub async fn register(
    State(store): State<Arc<dyn UserStore>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    tracing::info!("Register request for: {}", request.email);

    request
        .validate()
        .map_err(|msg| BackendError::handler(StatusCode::BAD_REQUEST, msg))?;

    if store.find_by_email(&request.email).await?.is_some() {
        tracing::warn!("Email already taken: {}", request.email);
        return Err(StoreError::Conflict(EMAIL_TAKEN.to_string()).into());
    }
    if store.find_by_username(&request.username).await?.is_some() {
        tracing::warn!("Username already taken: {}", request.username);
        return Err(StoreError::Conflict(USERNAME_TAKEN.to_string()).into());
    }

    let password_hash = password::hash(&request.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    let user = store
        .create(NewUser {
            username: request.username.trim().to_string(),
            email: request.email,
            password_hash,
            display_name: request.display_name.trim().to_string(),
            is_admin: request.is_admin,
        })
        .await?;

    tracing::info!("User registered: {} ({})", user.username, user.email);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
