//! HTTP API adapter (axum). Drives the same use cases as the terminal UI.

pub mod error;
pub mod router;

pub use error::ApiError;
pub use router::{create_router, AppState, CALLER_HEADER};

use crate::domain::DomainError;
use tokio::net::TcpListener;
use tracing::info;

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> Result<(), DomainError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| DomainError::Internal(format!("bind {}: {}", addr, e)))?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: GET http://{}/health", addr);
    info!("  Evaluate: POST http://{}/evaluate", addr);
    info!("  CK only: POST http://{}/evaluate/myopathy", addr);

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| DomainError::Internal(format!("server error: {}", e)))
}
