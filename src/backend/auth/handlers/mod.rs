//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── refresh.rs   - Token pair refresh handler
//! └── me.rs        - Current user and admin check handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /auth/register - User registration
//! - **`login`** - POST /auth/login - Email and password → token pair
//! - **`refresh`** - POST /auth/refresh - Refresh token → new token pair
//! - **`get_me`** - GET /auth/me - Current user info
//! - **`admin`** - GET /auth/admin - Whether the current user is an admin
//!
//! # Example
//!
//! ```rust,no_run
//! use brainbridge::backend::auth::handlers::{login, register};
//! use brainbridge::backend::AppState;
//! use axum::{routing::post, Router};
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/auth/register", post(register))
//!     .route("/auth/login", post(login));
//! ```

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh handler
pub mod refresh;

/// Current user handlers
pub mod me;

pub use types::{AdminResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenPair, UserResponse};

pub use register::register;
pub use login::login;
pub use refresh::refresh;
pub use me::{admin, get_me};
