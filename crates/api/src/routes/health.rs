//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use cashbox_core::compute_operational_day;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Current instant as seen by the server.
    pub server_time: DateTime<Utc>,
    /// The same instant in the drawer's zone.
    pub local_time: String,
    /// Zone the operational day is computed in.
    pub timezone: String,
    /// Operational day the current instant belongs to.
    pub operational_day: NaiveDate,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = state.clock.now();
    let tz = state.drawer.timezone;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        server_time: now,
        local_time: now.with_timezone(&tz).to_rfc3339(),
        timezone: tz.name().to_string(),
        operational_day: compute_operational_day(now, tz),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
