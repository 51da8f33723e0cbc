/**
 * Authentication Extractor
 *
 * `CurrentUser` resolves the `Authorization: Bearer <token>` header of a
 * request to the stored user. Handlers that take it as a parameter are
 * protected: a missing, invalid or expired token, or a token whose user no
 * longer exists, rejects the request with 401 before the handler runs.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let user = state.resolver.resolve_bearer(header).await.map_err(|e| {
            tracing::warn!("Rejected request to {}: {}", parts.uri.path(), e);
            e
        })?;

        Ok(CurrentUser(user))
    }
}
