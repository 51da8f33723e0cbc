//! Shared Module
//!
//! This module contains the wire types exchanged with clients over the chat
//! WebSocket. They carry no server state and serialize to plain JSON objects,
//! so a client written against them sees exactly what the server sends.

/// Chat frame data structures
pub mod message;

/// Re-export commonly used types for convenience
pub use message::{ChatBroadcast, ChatMessage};
