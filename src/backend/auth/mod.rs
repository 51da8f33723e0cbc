//! Authentication Module
//!
//! This module handles password hashing, session tokens, identity
//! resolution and user registration.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`password`** - Argon2 hashing and verification
//! - **`sessions`** - JWT token issuance and verification
//! - **`resolver`** - Token → user resolution for HTTP and WebSocket
//! - **`users`** - User model, `UserStore` trait and PostgreSQL store
//! - **`memory`** - In-memory `UserStore`
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - JWT token management
//! ├── resolver.rs     - Identity resolution
//! ├── users.rs        - User model and database operations
//! ├── memory.rs       - In-memory user store
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user stored with hashed password
//! 2. **Login**: email and password verified → access and refresh tokens returned
//! 3. **Refresh**: refresh token → new token pair
//! 4. **Me**: access token → user info
//!
//! # Security
//!
//! - Passwords are hashed with Argon2id and a fresh salt per hash
//! - Tokens are stateless HMAC-signed JWTs; there is no revocation list
//! - Access tokens expire after `ACCESS_TOKEN_EXPIRE_MINUTES`, refresh
//!   tokens after `REFRESH_TOKEN_EXPIRE_DAYS`
//! - Every authentication failure returns the same 401

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Identity resolution from tokens
pub mod resolver;

/// User data model and database operations
pub mod users;

/// In-memory user store
pub mod memory;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{admin, get_me, login, refresh, register};
pub use memory::MemoryUserStore;
pub use resolver::{AuthError, IdentityResolver};
pub use sessions::{Claims, Clock, ManualClock, SystemClock, TokenError, TokenPair, TokenService, TokenType};
pub use users::{NewUser, PgUserStore, StoreError, User, UserResponse, UserStore};
