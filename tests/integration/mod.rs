//! Integration tests
//!
//! - `api` - HTTP endpoints over axum-test
//! - `realtime` - the chat WebSocket

mod api;
