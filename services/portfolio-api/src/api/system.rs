//! System/health API handlers.
//!
//! # Purpose and responsibility
//! Provides the liveness banner at `/` and a storage health probe.
//!
//! # Key invariants and assumptions
//! - Liveness never touches storage; the server answers even while the
//!   database is unreachable.
use crate::api::error::{ApiError, api_internal};
use crate::api::types::HealthStatus;
use crate::app::AppState;
use axum::Json;
use axum::extract::State;

pub const LIVENESS_TEXT: &str = "Art Portfolio API is running";

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    )
)]
pub(crate) async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Storage reachable", body = HealthStatus),
        (status = 500, description = "Storage unavailable", body = crate::api::types::ErrorResponse)
    )
)]
/// Return storage health.
///
/// # Errors
/// - Returns 500 if the store does not answer its ping.
pub(crate) async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    if let Err(err) = state.store.health_check().await {
        return Err(api_internal("storage unavailable", &err));
    }
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        backend: state.store.backend_name().to_string(),
        durable: state.store.is_durable(),
    }))
}
