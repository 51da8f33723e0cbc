//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Settings from the environment, user store selection
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Settings and database loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `Settings::from_env`
//! 2. **Store Selection**: PostgreSQL when `DATABASE_URL` is set, in-memory otherwise
//! 3. **State Creation**: token service, identity resolver, chat registry
//! 4. **Router Creation**: routes, CORS and tracing layers

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, Settings, WsAuthFailure};
pub use init::create_app;
pub use state::AppState;
