//! services/api/src/bin/api.rs

use api_lib::{
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");
    info!(app_dir = %config.app_dir.display(), "Serving documentation for CMS application");
    for root in &config.documentation_roots {
        info!(root = %root.display(), "Documentation root candidate");
    }
    info!(dir = %config.content_types_dir.display(), "Reading content types");

    // --- 2. Build the Shared AppState ---
    let app_state = Arc::new(AppState::from_config(config.clone()));
    let versions = app_state.docs.versions();
    match versions.last() {
        Some(latest) => info!(count = versions.len(), %latest, "Documentation versions found"),
        None => info!("No documentation versions found yet"),
    }

    // --- 3. Create the Web Router ---
    let app = build_router(app_state)?;

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
