//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, CORS and tracing layers
//! - **`chat_routes`** - Chat WebSocket route
//! - **`api_routes`** - Authentication and health routes
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── chat_routes.rs  - Chat route
//! └── api_routes.rs   - API endpoints
//! ```

/// Main router creation
pub mod router;

/// Chat routes
pub mod chat_routes;

/// API routes
pub mod api_routes;

pub use router::create_router;
