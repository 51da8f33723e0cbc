/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - Loaded settings
 * - The user store
 * - The token service and identity resolver
 * - The chat connection registry
 *
 * # Thread Safety
 *
 * Everything here is cheap to clone and shared:
 * - `Arc<dyn UserStore>` for the store
 * - `ConnectionRegistry` wraps an `Arc<Mutex<..>>`
 * - `TokenService` and `IdentityResolver` are read-only after startup
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust
 * use brainbridge::backend::auth::TokenService;
 * use axum::extract::State;
 *
 * async fn handler(State(tokens): State<TokenService>) {
 *     let _ = tokens.access_ttl();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::resolver::IdentityResolver;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::UserStore;
use crate::backend::chat::registry::ConnectionRegistry;
use crate::backend::server::config::Settings;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup
    pub settings: Arc<Settings>,

    /// User persistence
    pub store: Arc<dyn UserStore>,

    /// Token issuance and verification
    pub tokens: TokenService,

    /// Token → user resolution, shared by HTTP and WebSocket handlers
    pub resolver: IdentityResolver,

    /// Live chat sockets keyed by username
    pub registry: ConnectionRegistry,
}

impl AppState {
    /// Build state from settings and a user store
    pub fn new(settings: Settings, store: Arc<dyn UserStore>) -> Self {
        let tokens = TokenService::new(
            &settings.secret_key,
            settings.algorithm,
            settings.access_ttl(),
            settings.refresh_ttl(),
        );
        Self::with_tokens(settings, store, tokens)
    }

    /// Build state around an already configured token service
    ///
    /// Used by tests that need a controlled clock.
    pub fn with_tokens(settings: Settings, store: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        let resolver = IdentityResolver::new(tokens.clone(), store.clone());
        Self {
            settings: Arc::new(settings),
            store,
            tokens,
            resolver,
            registry: ConnectionRegistry::new(),
        }
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for IdentityResolver {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.resolver.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}
