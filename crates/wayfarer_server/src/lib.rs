//! HTTP edge for the Wayfarer itinerary planner.
//!
//! Exposes the planner over JSON:
//!
//! - `POST /ai-planner` and `POST /itinerary/generate` accept a planner input
//!   and return the generation result
//! - `GET /health` returns `{"status": "healthy"}`
//!
//! Errors are mapped to status codes by kind: validation → 400, provider
//! failure or exhausted keys → 503, malformed model output → 502.

mod api;
mod config;

pub use api::{ApiError, ApiState, create_router, status_for};
pub use config::{
    AppConfig, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, GeminiSettings, ServerSettings,
    env_api_keys,
};

use std::sync::Arc;
use tracing::{info, instrument};
use wayfarer_interface::GenerationProvider;
use wayfarer_planner::Planner;

/// Serve the API on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind.
#[instrument(skip(planner))]
pub async fn serve<P>(planner: Arc<Planner<P>>, addr: &str) -> std::io::Result<()>
where
    P: GenerationProvider + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        model = planner.provider().model_name(),
        keys = planner.pool().len(),
        "Wayfarer API listening"
    );

    axum::serve(listener, create_router(planner))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
