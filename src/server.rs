//! Process wiring: builds the registry, starts the sweeper, serves HTTP.

use crate::{
    api::{cors_layer, create_router},
    config::RegistryConfig,
    registry::{
        adapters::{http::HttpCardFetcher, memory::InMemoryAgentStore},
        services::{LivenessSweeper, RegistryService, SweeperConfigError},
    },
};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Errors that stop the registry process.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Sweep settings were rejected.
    #[error("invalid liveness configuration: {0}")]
    Config(#[from] SweeperConfigError),

    /// The outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Fetcher(#[from] reqwest::Error),

    /// Binding or serving the listener failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the registry until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`ServerError`] when configuration is invalid, the listener
/// cannot be bound, or the server fails while running.
pub async fn run(config: &RegistryConfig) -> Result<(), ServerError> {
    let sweeper_config = config.sweeper()?;
    let store = Arc::new(InMemoryAgentStore::new());
    let fetcher = Arc::new(HttpCardFetcher::new(config.fetcher())?);
    let clock = Arc::new(DefaultClock);

    let registry = Arc::new(RegistryService::new(
        Arc::clone(&store),
        Arc::clone(&fetcher),
        Arc::clone(&clock),
        config.check_interval(),
    ));
    let sweeper = LivenessSweeper::new(store, fetcher, clock, sweeper_config);

    if config.allows_any_origin() {
        warn!("CORS allows any origin");
    }
    let app = create_router(registry, cors_layer(&config.cors_origins));

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let local_addr = listener.local_addr()?;
    log_banner(config, local_addr);

    let handle = sweeper.start();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    handle.stop().await;
    info!("registry stopped");
    served.map_err(ServerError::from)
}

fn log_banner(config: &RegistryConfig, addr: std::net::SocketAddr) {
    info!(
        app = %config.app_name,
        version = env!("CARGO_PKG_VERSION"),
        %addr,
        health_check_interval = config.health_check_interval,
        max_failures = config.max_failures,
        debug = config.debug,
        "registry listening"
    );
    info!("  POST   http://{addr}/register");
    info!("  GET    http://{addr}/discover?skill=<skill>");
    info!("  GET    http://{addr}/agents");
    info!("  DELETE http://{addr}/unregister?url=<url>");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received terminate signal, shutting down"),
    }
}
