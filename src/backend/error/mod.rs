//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Request-level failures with an explicit status code
//! - `Auth` - Authentication failures, always reported as 401
//! - `Store` - User store failures
//! - `Token` - Token signing failures
//!
//! # HTTP Response Conversion
//!
//! All backend errors implement `IntoResponse` from Axum, so handlers can
//! return them directly. Bodies are JSON: `{"error": "...", "status": 401}`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
