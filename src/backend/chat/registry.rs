/**
 * Chat Connection Registry
 *
 * Process-wide map from identity key (username, or `"guest"`) to the live
 * socket registered under it. There is one chat channel: a broadcast goes
 * to every registered socket, the sender's own included.
 *
 * # Socket Handles
 *
 * The registry never touches a socket directly. Each connection runs a
 * writer task that owns the socket sink and drains an unbounded channel;
 * the channel's sender is the handle stored here.
 *
 * # Replacement
 *
 * At most one socket per key. Registering a key that is already present
 * sends the old socket a close frame and drops it from the map. Each
 * registration gets an id, and `release` only removes the entry when the
 * id still matches, so a replaced connection that closes late cannot evict
 * its replacement.
 *
 * # Locking
 *
 * The map sits behind a `std::sync::Mutex`. The lock is never held across
 * an `.await`: broadcast copies the senders out, releases the lock, then
 * sends.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::ws::{CloseFrame, Message};
use tokio::sync::mpsc;

use crate::shared::ChatBroadcast;

/// Sending half of a connection's outbound queue
pub type ConnectionSender = mpsc::UnboundedSender<Message>;

/// Close code sent to a socket replaced by a newer one for the same key
pub const CLOSE_REPLACED: u16 = 4000;

#[derive(Debug)]
struct Entry {
    id: u64,
    sender: ConnectionSender,
}

/// Proof of a registration, used to release it later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    key: String,
    id: u64,
}

impl Registration {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Registry of live chat connections
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<String, Entry>>>,
    next_id: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // Every critical section is a single map operation, so a poisoned
        // map is still consistent.
        self.connections.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register `sender` under `key`, closing any socket it replaces
    pub fn register(&self, key: &str, sender: ConnectionSender) -> Registration {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let previous = self.lock().insert(key.to_string(), Entry { id, sender });

        if let Some(previous) = previous {
            tracing::info!("Replacing existing chat connection for {}", key);
            let _ = previous.sender.send(Message::Close(Some(CloseFrame {
                code: CLOSE_REPLACED,
                reason: "Replaced by a newer connection".into(),
            })));
        }

        tracing::debug!("Chat connection registered: {} (id {})", key, id);

        Registration {
            key: key.to_string(),
            id,
        }
    }

    /// Remove whatever is registered under `key`
    ///
    /// Removing a key that is not present does nothing.
    pub fn deregister(&self, key: &str) {
        if self.lock().remove(key).is_some() {
            tracing::debug!("Chat connection deregistered: {}", key);
        }
    }

    /// Remove the entry for `registration` if it has not been replaced
    ///
    /// Returns whether an entry was removed.
    pub fn release(&self, registration: &Registration) -> bool {
        let mut connections = self.lock();
        let owned = connections
            .get(&registration.key)
            .is_some_and(|entry| entry.id == registration.id);

        if owned {
            connections.remove(&registration.key);
            tracing::debug!("Chat connection released: {}", registration.key);
        }
        owned
    }

    /// Send `{"username": sender_key, "message": text}` to every registered socket
    ///
    /// Returns how many sockets the envelope was queued for. Sockets whose
    /// writer has already stopped are skipped; their own handlers clean up.
    pub fn broadcast(&self, sender_key: &str, text: &str) -> usize {
        let payload = match serde_json::to_string(&ChatBroadcast::new(sender_key, text)) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize chat broadcast: {}", e);
                return 0;
            }
        };

        let senders: Vec<ConnectionSender> = self
            .lock()
            .values()
            .map(|entry| entry.sender.clone())
            .collect();

        let delivered = senders
            .iter()
            .filter(|sender| sender.send(Message::Text(payload.clone().into())).is_ok())
            .count();

        tracing::debug!("Broadcast from {} queued for {}/{} connections", sender_key, delivered, senders.len());

        delivered
    }

    /// Number of registered connections
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }
}
