//! Refresh handler for POST /auth/refresh
//!
//! Exchanges a valid refresh token for a new access/refresh pair. Access
//! tokens are not accepted here.

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{RefreshRequest, TokenPair};
use crate::backend::auth::resolver::IdentityResolver;
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;

/// Refresh handler
///
/// # Errors
///
/// * `401 Unauthorized` - Token invalid, expired, not a refresh token, or
///   its user no longer exists
pub async fn refresh(
    State(resolver): State<IdentityResolver>,
    State(tokens): State<TokenService>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, BackendError> {
    let user = resolver.resolve_refresh(&request.refresh_token).await.map_err(|e| {
        tracing::warn!("Refresh rejected: {}", e);
        e
    })?;

    tracing::debug!("Refreshing tokens for {}", user.email);

    Ok(Json(tokens.issue_pair(&user.email)?))
}
