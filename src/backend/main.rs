/**
 * BrainBridge Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads settings from the environment
 * and serves the Axum app on `0.0.0.0:SERVER_PORT`.
 */

use brainbridge::backend::server::{config::Settings, init::create_app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings::from_env()?;
    let port = settings.server_port;

    let app = create_app(settings).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
