/**
 * Chat WebSocket Handler
 *
 * This module implements GET /chat/ws, the single broadcast chat channel.
 *
 * # Handshake
 *
 * Browsers cannot set an `Authorization` header on a WebSocket, so the
 * client smuggles its access token in as the second offered subprotocol:
 *
 * ```http
 * GET /chat/ws HTTP/1.1
 * Upgrade: websocket
 * Sec-WebSocket-Protocol: json, eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...
 * ```
 *
 * The server only ever echoes the first entry (`json`) back.
 *
 * # Authentication Failure
 *
 * Decided by `WS_AUTH_FAILURE`:
 * - `guest` - the connection proceeds under the identity key `"guest"`
 * - `reject` - the socket is closed with code 1008 and never registered
 *
 * # Connection Lifecycle
 *
 * 1. Identity resolved before the upgrade
 * 2. Writer task spawned; its queue sender is registered under the key
 * 3. Every inbound `{"message": ..}` text frame is broadcast to all sockets
 * 4. On close, read error, or writer exit the registration is released and
 *    the writer aborted
 */

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header::SEC_WEBSOCKET_PROTOCOL, HeaderMap},
    response::Response,
};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::backend::auth::resolver::split_protocols;
use crate::backend::chat::registry::ConnectionRegistry;
use crate::backend::error::types::UNAUTHORIZED_MESSAGE;
use crate::backend::server::config::WsAuthFailure;
use crate::backend::server::state::AppState;
use crate::shared::ChatMessage;

/// Identity key for unauthenticated connections under the `guest` policy
pub const GUEST_KEY: &str = "guest";

/// Chat WebSocket handler
pub async fn chat_ws(ws: WebSocketUpgrade, headers: HeaderMap, State(state): State<AppState>) -> Response {
    let protocols = split_protocols(
        headers
            .get_all(SEC_WEBSOCKET_PROTOCOL)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    );

    let identity = match state.resolver.resolve_subprotocols(&protocols).await {
        Ok(user) => Some(user.username),
        Err(e) => {
            tracing::warn!("Chat handshake failed authentication: {}", e);
            None
        }
    };

    let ws = match protocols.into_iter().next().filter(|first| !first.is_empty()) {
        Some(first) => ws.protocols([first]),
        None => ws,
    };

    let registry = state.registry.clone();
    match (identity, state.settings.ws_auth_failure) {
        (Some(key), _) => ws.on_upgrade(move |socket| run_connection(socket, registry, key)),
        (None, WsAuthFailure::Guest) => {
            ws.on_upgrade(move |socket| run_connection(socket, registry, GUEST_KEY.to_string()))
        }
        (None, WsAuthFailure::Reject) => ws.on_upgrade(reject),
    }
}

/// Close an unauthenticated socket with a policy violation
async fn reject(mut socket: WebSocket) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: UNAUTHORIZED_MESSAGE.into(),
    };
    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!("Failed to send policy close frame: {}", e);
    }
}

/// Serve one registered chat connection until it closes
pub async fn run_connection(socket: WebSocket, registry: ConnectionRegistry, key: String) {
    let (sink, stream) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<Message>();

    let mut writer = tokio::spawn(writer_task(sink, rx));
    let registration = registry.register(&key, tx);

    tracing::info!("Chat connection opened: {}", key);

    tokio::select! {
        _ = read_loop(stream, &registry, &key) => {}
        _ = &mut writer => {
            tracing::debug!("Chat writer for {} stopped", key);
        }
    }

    registry.release(&registration);
    writer.abort();

    tracing::info!("Chat connection closed: {}", key);
}

async fn read_loop(mut stream: SplitStream<WebSocket>, registry: &ConnectionRegistry, key: &str) {
    while let Some(received) = stream.next().await {
        match received {
            Ok(Message::Text(text)) => match serde_json::from_str::<ChatMessage>(text.as_str()) {
                Ok(frame) => {
                    registry.broadcast(key, &frame.message);
                }
                Err(e) => {
                    tracing::debug!("Ignoring invalid chat frame from {}: {}", key, e);
                }
            },
            Ok(Message::Close(frame)) => {
                tracing::debug!("Client {} initiated close: {:?}", key, frame);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Chat receive error for {}: {}", key, e);
                break;
            }
        }
    }
}

/// Forward queued messages to the socket
///
/// Stops when the socket fails or after a close frame has been sent.
async fn writer_task(mut sink: SplitSink<WebSocket, Message>, mut rx: mpsc::UnboundedReceiver<Message>) {
    while let Some(message) = rx.recv().await {
        let closing = matches!(message, Message::Close(_));
        if sink.send(message).await.is_err() || closing {
            break;
        }
    }
}
