/**
 * User Model and Store
 *
 * This module defines the stored user record and the `UserStore` trait the
 * rest of the backend talks to. `PgUserStore` is the PostgreSQL
 * implementation; `MemoryUserStore` (in `auth::memory`) keeps users in
 * process for development and tests.
 *
 * # Uniqueness
 *
 * Both `email` and `username` are unique. Inserting a duplicate fails with
 * `StoreError::Conflict` carrying the client-facing message.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

pub const EMAIL_TAKEN: &str = "Email already taken";
pub const USERNAME_TAKEN: &str = "Username already taken";

/// User struct representing a user in the database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, at least 3 chars); also the chat identity key
    pub username: String,
    /// User email address (unique); the `sub` of issued tokens
    pub email: String,
    /// Argon2 PHC hash; never serialized
    pub password_hash: String,
    /// Name shown in the client
    pub display_name: String,
    /// Administrator flag
    pub is_admin: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// User response (without password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Fields for a user about to be inserted
///
/// `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub is_admin: bool,
}

/// User store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique email or username already in use
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence interface for users
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user, failing with `Conflict` on a duplicate email or username
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

/// PostgreSQL user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation to the message for the column it hit
fn conflict_from(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some(constraint) if constraint.contains("username") => USERNAME_TAKEN,
                _ => EMAIL_TAKEN,
            };
            return StoreError::Conflict(message.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, display_name, is_admin, created_at
            FROM users
            WHERE email = $1
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, display_name, is_admin, created_at
            FROM users
            WHERE username = $1
            "#
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, display_name, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password_hash, display_name, is_admin, created_at
            "#
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.is_admin)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_from)
    }
}
