/**
 * Chat Route Handlers
 *
 * # Routes
 *
 * - `GET /chat/ws` - Chat WebSocket; token offered as the second
 *   `Sec-WebSocket-Protocol` entry
 */

use axum::{routing::get, Router};

use crate::backend::chat::socket::chat_ws;
use crate::backend::server::state::AppState;

/// Configure chat-related routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/chat/ws", get(chat_ws))
}
