/**
 * Session Tokens
 *
 * This module issues and verifies the signed JWTs used for sessions.
 *
 * # Token Types
 *
 * - **access** - short lived, authorizes API calls and the chat socket
 * - **refresh** - long lived, only accepted by `/auth/refresh`
 *
 * # Claims
 *
 * ```json
 * { "sub": "user@example.com", "type": "access", "exp": 1700000000 }
 * ```
 *
 * `sub` is the user's email, `exp` is absolute unix seconds.
 *
 * # Expiry
 *
 * The library's own `exp` check (with its leeway) is turned off. Expiry is
 * checked against a `Clock` owned by the service, so a token issued with a
 * zero lifetime is already expired and tests can move time forward.
 */

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source of the current time in unix seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock that only moves when told to
///
/// Used by tests to check expiry without sleeping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Token type carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Token type
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Access/refresh token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token verification and signing errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens
///
/// Holds the signing secret, the algorithm, both lifetimes and the clock.
/// Built once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service on the system clock
    pub fn new(secret: &str, algorithm: Algorithm, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            access_ttl,
            refresh_ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Sign a token for `subject` that expires `ttl` from now
    pub fn issue(&self, subject: &str, token_type: TokenType, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims {
            sub: Some(subject.to_string()),
            token_type,
            exp: self.clock.now().saturating_add(ttl.num_seconds()),
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Sign an access token with the configured access lifetime
    pub fn issue_access(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, TokenType::Access, self.access_ttl)
    }

    /// Sign a refresh token with the configured refresh lifetime
    pub fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, TokenType::Refresh, self.refresh_ttl)
    }

    /// Sign a fresh access/refresh pair
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(subject)?,
            refresh_token: self.issue_refresh(subject)?,
        })
    }

    /// Verify a token's signature and expiry and return its claims
    ///
    /// The token type is not checked here; callers compare `token_type`
    /// against what they expect.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        if self.clock.now() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
