//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok").
    pub status: String,
    /// Crate version from Cargo.toml.
    pub version: String,
    /// Seconds since service started.
    pub uptime_seconds: u64,
    /// Number of titles in the hymnal index.
    pub hymn_titles: usize,
}

/// GET /health
///
/// Health check endpoint for monitoring.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = u64::try_from(uptime.num_seconds()).unwrap_or_default();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        hymn_titles: state.hymns.len(),
    })
}
