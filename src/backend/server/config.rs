/**
 * Server Configuration
 *
 * This module loads the server settings from environment variables, with
 * defaults for local development, and connects the optional PostgreSQL
 * database.
 *
 * # Configuration Sources
 *
 * `Settings::from_env` reads the process environment (after `.env` has been
 * loaded by the binary). `Settings::from_lookup` takes any lookup function,
 * which is what the tests use.
 *
 * # Error Handling
 *
 * Malformed values are rejected with `ConfigError`; the server does not
 * start on a bad configuration. A missing or unreachable database is not an
 * error: the server falls back to the in-memory user store.
 */

use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::memory::MemoryUserStore;
use crate::backend::auth::users::{PgUserStore, UserStore};

const DEFAULT_SECRET_KEY: &str = "SUPER_SECRET_KEY";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),
}

/// What the chat endpoint does when a WebSocket handshake fails authentication
///
/// `Guest` keeps the connection open under the identity key `"guest"`;
/// `Reject` closes it with code 1008 before it is ever registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsAuthFailure {
    Guest,
    Reject,
}

impl FromStr for WsAuthFailure {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "reject" => Ok(Self::Reject),
            _ => Err(()),
        }
    }
}

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// HMAC signing secret for JWTs
    pub secret_key: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HTTP listen port
    pub server_port: u16,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
    /// Chat handshake authentication failure policy
    pub ws_auth_failure: WsAuthFailure,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 1,
            database_url: None,
            server_port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            ws_auth_failure: WsAuthFailure::Guest,
        }
    }
}

impl Settings {
    /// Access token lifetime, saturating at the largest representable span
    pub fn access_ttl(&self) -> Duration {
        Duration::try_minutes(self.access_token_expire_minutes).unwrap_or(Duration::MAX)
    }

    /// Refresh token lifetime, saturating at the largest representable span
    pub fn refresh_ttl(&self) -> Duration {
        Duration::try_days(self.refresh_token_expire_days).unwrap_or(Duration::MAX)
    }

    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary lookup function
    ///
    /// Unset or empty variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut settings = Self::default();

        match get("SECRET_KEY") {
            Some(secret) => settings.secret_key = secret,
            None => tracing::warn!("SECRET_KEY not set. Using the development default."),
        }

        if let Some(value) = get("ALGORITHM") {
            settings.algorithm = parse_algorithm(&value)?;
        }

        if let Some(value) = get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            settings.access_token_expire_minutes =
                parse_ttl("ACCESS_TOKEN_EXPIRE_MINUTES", &value, Duration::try_minutes)?;
        }

        if let Some(value) = get("REFRESH_TOKEN_EXPIRE_DAYS") {
            settings.refresh_token_expire_days =
                parse_ttl("REFRESH_TOKEN_EXPIRE_DAYS", &value, Duration::try_days)?;
        }

        settings.database_url = get("DATABASE_URL");

        if let Some(value) = get("SERVER_PORT") {
            settings.server_port = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value: value.clone(),
            })?;
        }

        if let Some(value) = get("CORS_ORIGINS") {
            settings.cors_origins = value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(value) = get("WS_AUTH_FAILURE") {
            settings.ws_auth_failure = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "WS_AUTH_FAILURE",
                value: value.clone(),
            })?;
        }

        Ok(settings)
    }
}

fn parse_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(value.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedAlgorithm(value.to_string())),
    }
}

/// Parse a positive token lifetime that `to_duration` can represent
fn parse_ttl(
    name: &'static str,
    value: &str,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<i64, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 && to_duration(n).is_some() => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

/// Connect the user store
///
/// 1. Without `DATABASE_URL`, returns the in-memory store
/// 2. Otherwise connects a PostgreSQL pool and runs migrations
///
/// Connection failures are logged and fall back to the in-memory store, so
/// the server still starts for local development.
pub async fn load_user_store(settings: &Settings) -> Arc<dyn UserStore> {
    let Some(database_url) = &settings.database_url else {
        tracing::warn!("DATABASE_URL not set. Users are kept in memory.");
        return Arc::new(MemoryUserStore::new());
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Users are kept in memory.");
            return Arc::new(MemoryUserStore::new());
        }
    };

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Continuing without migrations - database might not be up to date");
    }

    Arc::new(PgUserStore::new(pool))
}
