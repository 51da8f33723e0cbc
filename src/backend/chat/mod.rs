//! Chat Backend Module
//!
//! This module contains the server side of the single broadcast chat
//! channel:
//! - The connection registry (identity key → live socket)
//! - The WebSocket handler for GET /chat/ws
//!
//! Messages are never stored. A message exists only while it is being fanned
//! out to the sockets connected at that moment.
//!
//! # Architecture
//!
//! - **`registry`** - `ConnectionRegistry`: register, deregister, release, broadcast
//! - **`socket`** - Handshake authentication and the per-connection loop
//!
//! # Example
//!
//! ```rust
//! use brainbridge::backend::chat::ConnectionRegistry;
//! use tokio::sync::mpsc;
//!
//! let registry = ConnectionRegistry::new();
//! let (tx, mut rx) = mpsc::unbounded_channel();
//! registry.register("alice", tx);
//! assert_eq!(registry.broadcast("alice", "hi"), 1);
//! assert!(rx.try_recv().is_ok());
//! ```

/// Connection registry
pub mod registry;

/// Chat WebSocket handler
pub mod socket;

pub use registry::{ConnectionRegistry, ConnectionSender, Registration};
pub use socket::chat_ws;
