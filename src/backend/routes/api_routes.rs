/**
 * API Route Handlers
 *
 * This module wires the authentication endpoints and the health check.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - Email and password → token pair
 * - `POST /auth/refresh` - Refresh token → new token pair
 * - `GET /auth/me` - Current user info (bearer token)
 * - `GET /auth/admin` - Admin check (bearer token)
 *
 * ## Service
 * - `GET /health` - Name and version
 */

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::backend::auth::handlers::{admin, get_me, login, refresh, register};
use crate::backend::server::state::AppState;

/// Health check body
#[derive(Debug, Serialize)]
pub struct Health {
    pub name: &'static str,
    pub version: &'static str,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Configure API routes
///
/// `/auth/me` and `/auth/admin` are protected by the `CurrentUser`
/// extractor in their handlers; the rest are public.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(get_me))
        .route("/auth/admin", get(admin))
        .route("/health", get(health))
}
