/**
 * Chat Frame Data Structures
 *
 * This module defines the two JSON frames used on the chat WebSocket:
 * the inbound frame a client sends and the broadcast frame every connected
 * client receives.
 */
use serde::{Deserialize, Serialize};

/// Inbound chat frame
///
/// Clients send `{"message": "..."}`. A frame without a `message` field is
/// accepted and treated as an empty message.
///
/// # Example
/// ```rust
/// use brainbridge::shared::ChatMessage;
///
/// let frame: ChatMessage = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
/// assert_eq!(frame.message, "hi");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// The message text
    #[serde(default)]
    pub message: String,
}

/// Outbound broadcast frame
///
/// Sent verbatim to every registered socket, the sender's own included.
///
/// ```json
/// { "username": "John", "message": "Hello world!" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatBroadcast {
    /// Identity key of the sender
    pub username: String,
    /// The message text
    pub message: String,
}

impl ChatBroadcast {
    /// Create a new broadcast frame
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
        }
    }
}
