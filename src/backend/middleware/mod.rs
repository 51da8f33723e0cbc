//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! # Architecture
//!
//! - **`auth`** - `CurrentUser` extractor for routes that require a bearer token
//!
//! # Example
//!
//! ```rust,no_run
//! use brainbridge::backend::middleware::CurrentUser;
//!
//! async fn handler(CurrentUser(user): CurrentUser) -> String {
//!     user.username
//! }
//! ```

pub mod auth;

pub use auth::CurrentUser;
