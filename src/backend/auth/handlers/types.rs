/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/auth` endpoints. The user
 * projection (`UserResponse`) lives with the user model and the token pair
 * (`TokenPair`) with the token service; both are re-exported here.
 */

use serde::{Deserialize, Serialize};

pub use crate::backend::auth::sessions::TokenPair;
pub use crate::backend::auth::users::UserResponse;

/// Register request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// Chosen username (at least 3 chars); also the chat name
    pub username: String,
    /// Email address (unique, used to log in)
    pub email: String,
    /// Plaintext password (at least 8 chars, hashed before storage)
    pub password: String,
    /// Display name (1 to 100 chars)
    pub display_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl RegisterRequest {
    /// Check field constraints, returning the first violation
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().chars().count() < 3 {
            return Err("Username must be at least 3 characters");
        }
        if self.email.chars().count() < 5 || !self.email.contains('@') {
            return Err("Invalid email address");
        }
        if self.password.chars().count() < 8 {
            return Err("Password must be at least 8 characters");
        }
        let display_len = self.display_name.trim().chars().count();
        if display_len == 0 || display_len > 100 {
            return Err("Display name must be between 1 and 100 characters");
        }
        Ok(())
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Admin check response
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminResponse {
    pub ok: bool,
}
