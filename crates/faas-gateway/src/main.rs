//! # Function Gateway Server
//!
//! Binary entry point for the function gateway: wires the producer,
//! consumer, and relay functions into the registry and serves the
//! invocation API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faas_client::{ClientConfig, FunctionClient};
use faas_functions::{CacheFunction, CacheStore, RelayFunction};
use faas_gateway::{build_router, AppState, Config, FunctionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(version = faas_gateway::VERSION, "Starting function gateway");

    // Connect each cache user with its own credentials
    tracing::info!(
        endpoint = %config.cache.endpoint,
        port = config.cache.port,
        "Connecting cache users"
    );

    let producer_store =
        CacheStore::connect(&config.cache.connection_url(config.cache.producer_secret.as_deref())?)
            .await?;
    let consumer_store =
        CacheStore::connect(&config.cache.connection_url(config.cache.consumer_secret.as_deref())?)
            .await?;
    tracing::info!("Cache connected");

    // Relay calls back into this gateway through the invocation client
    let relay_client = FunctionClient::new(&ClientConfig::new(config.self_endpoint.clone()))?;

    // Register functions
    let mut registry = FunctionRegistry::new();
    registry.register("producer", Arc::new(CacheFunction::producer(producer_store)?));
    registry.register("consumer", Arc::new(CacheFunction::consumer(consumer_store)?));
    registry.register(
        "relay",
        Arc::new(RelayFunction::new(relay_client, config.relay_target.clone())),
    );

    tracing::info!(functions = ?registry.names(), "Functions registered");

    // Build router
    let app = build_router(AppState::new(registry));

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
