use anyhow::Result;
use std::sync::Arc;
use storefront_rust::config::{LogFormat, StoreConfig};
use storefront_rust::router::create_app_router;
use storefront_rust::state::AppState;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &StoreConfig) {
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = StoreConfig::load()?;
    init_logging(&config);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);

    // Initialize application state; the catalog fills in behind the listener
    let state = Arc::new(AppState::new(config));
    AppState::spawn_catalog_load(&state);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(event_name = "system.server.started", %addr, "storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(event_name = "system.server.stopping", "storefront stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
    }
}
