//! Backend Module
//!
//! This module contains all server-side code for BrainBridge: the Axum HTTP
//! server, authentication, and the chat WebSocket.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, JWT tokens, identity resolution, user store
//! - **`chat`** - Connection registry and the chat WebSocket handler
//! - **`middleware`** - Request extractors for the authenticated user
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Settings, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── chat/           - Chat registry and WebSocket handler
//! ├── middleware/     - Authenticated user extractor
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! All handlers share one `AppState` holding:
//! - the user store (`Arc<dyn UserStore>`)
//! - the token service and identity resolver
//! - the chat `ConnectionRegistry`
//! - the loaded `Settings`
//!
//! Everything is constructed once in `server::init::create_app` and handed
//! to handlers through Axum's `State` extractor; there are no globals.
//!
//! # Request Flow
//!
//! 1. HTTP request arrives
//! 2. `CurrentUser` extractor resolves the bearer token to an identity
//! 3. Handler runs with the resolved identity
//!
//! For chat:
//!
//! 1. `GET /chat/ws` with `Sec-WebSocket-Protocol: json, <token>`
//! 2. Identity resolved from the second negotiated protocol
//! 3. Socket registered under the username
//! 4. Every inbound `{"message": ..}` frame is broadcast to all sockets
//! 5. Registration released when the socket closes

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Chat connection registry and WebSocket handler
pub mod chat;

/// Request middleware and extractors
pub mod middleware;

/// Backend error types
pub mod error;

pub use server::{create_app, AppState};
pub use error::BackendError;
