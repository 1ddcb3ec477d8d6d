use std::sync::Arc;

use anyhow::Context;
use festpass_api::store::MemoryStore;
use festpass_api::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, BOOTSTRAP_OWNER_ID, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Festpass API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is empty; every bearer token will be rejected");
    }
    match &config.security.bootstrap_owner {
        Some(id) => tracing::info!("bootstrap owner configured: {}", id),
        None => tracing::warn!("no bootstrap owner configured; the owner level cannot be granted"),
    }

    // The document store backend is a boundary; the shipped binary
    // wires the in-memory implementation.
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store,
        &config.security.jwt_secret,
        config.security.bootstrap_owner.clone(),
    );

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("FESTPASS_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Festpass API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
