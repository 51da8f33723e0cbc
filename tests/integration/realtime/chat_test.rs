//! Chat WebSocket integration tests
//!
//! Each test serves the router on a real listener and connects with
//! tokio-tungstenite, offering `Sec-WebSocket-Protocol: json, <token>`.

use std::net::SocketAddr;
use std::time::Duration;

use brainbridge::backend::server::WsAuthFailure;
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::{create_test_user, create_unique_test_user, spawn_server, test_state, test_state_with_policy, wait_until};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connect offering `protocols` and return the client plus the protocol the server chose
async fn connect(addr: SocketAddr, protocols: &str) -> (Client, Option<String>) {
    let mut request = format!("ws://{addr}/chat/ws").into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Sec-WebSocket-Protocol", HeaderValue::from_str(protocols).unwrap());

    let (client, response) = connect_async(request).await.expect("websocket handshake");
    let selected = response
        .headers()
        .get("Sec-WebSocket-Protocol")
        .map(|value| value.to_str().unwrap().to_string());
    (client, selected)
}

async fn send_chat(client: &mut Client, message: &str) {
    let frame = json!({ "message": message }).to_string();
    client.send(Message::text(frame)).await.unwrap();
}

/// Next text frame as JSON, failing after a timeout
async fn next_json(client: &mut Client) -> Value {
    loop {
        let received = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        match received {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

/// Next close frame code, failing after a timeout
async fn next_close_code(client: &mut Client) -> u16 {
    loop {
        let received = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .expect("timed out waiting for close");
        match received {
            Some(Ok(Message::Close(Some(frame)))) => return frame.code.into(),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            other => panic!("expected close frame, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_server_echoes_first_protocol_only() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let addr = spawn_server(state).await;

    let (_client, selected) = connect(addr, &format!("json, {}", alice.access_token)).await;
    assert_eq!(selected.as_deref(), Some("json"));
}

#[tokio::test]
async fn test_broadcast_reaches_all_including_sender() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let bob = create_test_user(&state, "bob", "bob@example.com", false).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut alice_ws, _) = connect(addr, &format!("json, {}", alice.access_token)).await;
    let (mut bob_ws, _) = connect(addr, &format!("json, {}", bob.access_token)).await;
    assert!(wait_until(|| registry.contains("alice") && registry.contains("bob")).await);

    send_chat(&mut alice_ws, "hi").await;

    let expected = json!({"username": "alice", "message": "hi"});
    assert_eq!(next_json(&mut alice_ws).await, expected);
    assert_eq!(next_json(&mut bob_ws).await, expected);
}

#[tokio::test]
async fn test_messages_from_one_connection_keep_order() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut client, _) = connect(addr, &format!("json, {}", alice.access_token)).await;
    assert!(wait_until(|| registry.contains("alice")).await);

    for text in ["one", "two", "three"] {
        send_chat(&mut client, text).await;
    }
    for text in ["one", "two", "three"] {
        assert_eq!(next_json(&mut client).await["message"], text);
    }
}

#[tokio::test]
async fn test_missing_token_connects_as_guest() {
    let state = test_state();
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut client, selected) = connect(addr, "json").await;
    assert_eq!(selected.as_deref(), Some("json"));
    assert!(wait_until(|| registry.contains("guest")).await);

    send_chat(&mut client, "hello").await;
    assert_eq!(next_json(&mut client).await, json!({"username": "guest", "message": "hello"}));
}

#[tokio::test]
async fn test_invalid_token_connects_as_guest() {
    let state = test_state();
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (_client, _) = connect(addr, "json, not.a.token").await;
    assert!(wait_until(|| registry.contains("guest")).await);
}

#[tokio::test]
async fn test_reject_policy_closes_with_1008() {
    let state = test_state_with_policy(WsAuthFailure::Reject);
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut client, _) = connect(addr, "json").await;

    assert_eq!(next_close_code(&mut client).await, 1008);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_reject_policy_accepts_valid_token() {
    let state = test_state_with_policy(WsAuthFailure::Reject);
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (_client, _) = connect(addr, &format!("json, {}", alice.access_token)).await;
    assert!(wait_until(|| registry.contains("alice")).await);
}

#[tokio::test]
async fn test_invalid_frame_is_skipped() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut client, _) = connect(addr, &format!("json, {}", alice.access_token)).await;
    assert!(wait_until(|| registry.contains("alice")).await);

    client.send(Message::text("not json")).await.unwrap();
    send_chat(&mut client, "after").await;

    assert_eq!(next_json(&mut client).await["message"], "after");
}

#[tokio::test]
async fn test_frame_without_message_broadcasts_empty_string() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut client, _) = connect(addr, &format!("json, {}", alice.access_token)).await;
    assert!(wait_until(|| registry.contains("alice")).await);

    client.send(Message::text("{}")).await.unwrap();
    assert_eq!(next_json(&mut client).await, json!({"username": "alice", "message": ""}));
}

#[tokio::test]
async fn test_second_connection_replaces_first() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let bob = create_unique_test_user(&state).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let protocols = format!("json, {}", alice.access_token);
    let (mut first, _) = connect(addr, &protocols).await;
    assert!(wait_until(|| registry.contains("alice")).await);

    let (mut second, _) = connect(addr, &protocols).await;
    assert_eq!(next_close_code(&mut first).await, 4000);
    drop(first);

    let (mut sender, _) = connect(addr, &format!("json, {}", bob.access_token)).await;
    let bob_name = bob.user.username.clone();
    assert!(wait_until(|| registry.contains(&bob_name) && registry.len() == 2).await);

    send_chat(&mut sender, "ping").await;
    assert_eq!(next_json(&mut second).await["message"], "ping");
    assert!(registry.contains("alice"));
}

#[tokio::test]
async fn test_disconnect_deregisters() {
    let state = test_state();
    let alice = create_test_user(&state, "alice", "alice@example.com", false).await;
    let registry = state.registry.clone();
    let addr = spawn_server(state).await;

    let (mut client, _) = connect(addr, &format!("json, {}", alice.access_token)).await;
    assert!(wait_until(|| registry.contains("alice")).await);

    client.close(None).await.unwrap();

    assert!(wait_until(|| registry.is_empty()).await);
}
