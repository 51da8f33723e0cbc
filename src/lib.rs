//! BrainBridge - Main Library
//!
//! BrainBridge is the backend of a small idea-sharing platform. This crate
//! provides its authentication layer and its single broadcast chat channel.
//!
//! # Overview
//!
//! This library provides:
//! - Argon2 password hashing
//! - Stateless JWT access and refresh tokens
//! - Current-user resolution for HTTP requests and WebSocket handshakes
//! - An in-memory connection registry that fans chat messages out to every
//!   connected socket
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types used by clients and server alike
//!   - Chat message envelopes
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and WebSocket endpoint
//!   - Authentication, token service, user store
//!   - Chat connection registry
//!   - Configuration and error types
//!
//! # Usage
//!
//! ```rust,no_run
//! use brainbridge::backend::server::{config::Settings, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let app = create_app(settings).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - The connection registry is a `Mutex<HashMap<..>>` behind an `Arc`; the
//!   lock is never held across an `.await`
//! - Every socket is written by exactly one writer task fed through an
//!   unbounded `mpsc` channel
//! - The signing secret is fixed at startup and only read afterwards

/// Shared wire types
pub mod shared;

/// Backend server-side code
pub mod backend;
