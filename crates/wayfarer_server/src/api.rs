//! HTTP API for itinerary generation and health checks.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, instrument, warn};
use wayfarer_core::{GenerationResult, PlannerInput};
use wayfarer_error::{WayfarerError, WayfarerErrorKind};
use wayfarer_interface::GenerationProvider;
use wayfarer_planner::Planner;

/// API server state.
pub struct ApiState<P> {
    /// Shared planner
    pub planner: Arc<Planner<P>>,
}

impl<P> Clone for ApiState<P> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
        }
    }
}

/// Creates the API router.
pub fn create_router<P>(planner: Arc<Planner<P>>) -> Router
where
    P: GenerationProvider + 'static,
{
    let state = ApiState { planner };

    Router::new()
        .route("/health", get(health_check))
        .route("/ai-planner", post(generate_itinerary::<P>))
        .route("/itinerary/generate", post(generate_itinerary::<P>))
        .with_state(state)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generate a new itinerary or apply a modification.
#[instrument(skip_all)]
async fn generate_itinerary<P>(
    State(state): State<ApiState<P>>,
    body: Result<Json<PlannerInput>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError>
where
    P: GenerationProvider + 'static,
{
    let Json(input) = body.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected request body");
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let result = state.planner.generate(input).await?;
    Ok(Json(result))
}

/// Error response: a status code and `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<WayfarerError> for ApiError {
    fn from(err: WayfarerError) -> Self {
        let status = status_for(err.kind());
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %err, "Generation failed");
        } else {
            warn!(status = status.as_u16(), error = %err, "Generation rejected");
        }
        Self::new(status, err.public_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: &WayfarerErrorKind) -> StatusCode {
    match kind {
        WayfarerErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
        WayfarerErrorKind::Provider(_) | WayfarerErrorKind::PoolExhausted(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        WayfarerErrorKind::MalformedOutput(_) => StatusCode::BAD_GATEWAY,
        WayfarerErrorKind::Config(_) | WayfarerErrorKind::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
