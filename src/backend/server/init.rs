/**
 * Server Initialization
 *
 * This module builds the Axum application from loaded settings.
 *
 * # Initialization Process
 *
 * 1. Connect the user store (PostgreSQL, or in-memory without `DATABASE_URL`)
 * 2. Build the token service, identity resolver and chat registry
 * 3. Create and configure the router
 *
 * # Error Handling
 *
 * Startup is resilient: a missing or unreachable database falls back to
 * the in-memory store and failed migrations are logged.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_user_store, Settings};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
pub async fn create_app(settings: Settings) -> Router<()> {
    tracing::info!("Initializing BrainBridge backend server");

    let store = load_user_store(&settings).await;
    let app_state = AppState::new(settings, store);

    tracing::info!(
        "Token service ready ({:?}, access {} min, refresh {} days)",
        app_state.settings.algorithm,
        app_state.settings.access_token_expire_minutes,
        app_state.settings.refresh_token_expire_days,
    );

    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
