/**
 * Identity Resolution
 *
 * Turns a presented token into the stored user it belongs to. There is one
 * shared check (`resolve_token`) and one entry point per transport:
 *
 * - `resolve_bearer` - HTTP `Authorization: Bearer <token>`
 * - `resolve_subprotocols` - WebSocket `Sec-WebSocket-Protocol: json, <token>`
 * - `resolve_refresh` - refresh token from the `/auth/refresh` body
 *
 * # Checks
 *
 * 1. Signature and expiry (`TokenService::verify`)
 * 2. `type` claim matches the expected token type
 * 3. `sub` claim present and non-empty
 * 4. User with that email exists
 *
 * Nothing here mutates the user record.
 */

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::sessions::{TokenError, TokenService, TokenType};
use super::users::{StoreError, User, UserStore};

/// Identity resolution errors
///
/// Every variant except `Store` is reported to clients as the same 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no token presented")]
    MissingToken,
    #[error("token is invalid")]
    InvalidToken,
    #[error("token has expired")]
    Expired,
    #[error("token subject does not exist")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::Expired,
            _ => Self::InvalidToken,
        }
    }
}

/// Resolves tokens to users
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: TokenService,
    store: Arc<dyn UserStore>,
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    pub fn new(tokens: TokenService, store: Arc<dyn UserStore>) -> Self {
        Self { tokens, store }
    }

    /// Resolve a token of the expected type to its user
    pub async fn resolve_token(&self, token: &str, expected: TokenType) -> Result<User, AuthError> {
        let claims = self.tokens.verify(token)?;

        if claims.token_type != expected {
            tracing::debug!("Rejected {:?} token where {:?} was expected", claims.token_type, expected);
            return Err(AuthError::InvalidToken);
        }

        let email = match claims.sub.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => return Err(AuthError::InvalidToken),
        };

        match self.store.find_by_email(email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AuthError::UserNotFound),
            Err(e) => {
                tracing::error!("User lookup failed during authentication: {}", e);
                Err(AuthError::Store(e))
            }
        }
    }

    /// Resolve the value of an `Authorization` header
    ///
    /// The scheme is matched case-insensitively.
    pub async fn resolve_bearer(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        let token = authorization
            .map(str::trim)
            .and_then(|value| value.split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.resolve_token(token, TokenType::Access).await
    }

    /// Resolve the offered WebSocket subprotocols
    ///
    /// The token is the second entry; the first is the real protocol name.
    pub async fn resolve_subprotocols(&self, protocols: &[String]) -> Result<User, AuthError> {
        let token = protocols
            .get(1)
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.resolve_token(token, TokenType::Access).await
    }

    /// Resolve a refresh token
    pub async fn resolve_refresh(&self, token: &str) -> Result<User, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.resolve_token(token.trim(), TokenType::Refresh).await
    }
}

/// Split `Sec-WebSocket-Protocol` header values into trimmed entries
///
/// All occurrences of the header are concatenated in order.
pub fn split_protocols<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(|entry| entry.trim().to_string())
        .collect()
}
