// file: src/server/mod.rs
// description: HTTP server bootstrap and module exports
// reference: https://docs.rs/axum

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{AskRequest, AskResponse, router};

use crate::config::ServerConfig;
use crate::error::{Result, ServiceError};
use crate::service::QueryService;
use tracing::{info, warn};

/// Binds and serves until Ctrl-C. The service must already hold its index.
pub async fn serve(config: &ServerConfig, service: QueryService) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServiceError::Startup(format!("failed to bind {}: {}", addr, e)))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
