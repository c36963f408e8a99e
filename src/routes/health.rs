// src/routes/health.rs
//! Service health check.
//!
//! `/health` answers as long as the process can serve HTTP. It also reports
//! whether the sensor feed is currently connected and how many evaluations
//! have run, so an orchestrator can tell a live-but-starved monitor from a
//! working one without parsing the full assessment.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::SharedMonitor;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    connected: bool,
    evaluations: u64,
}

/// Handle `GET /health`.
async fn health(State(monitor): State<SharedMonitor>) -> Json<HealthResponse> {
    // ---
    let monitor = monitor.read().await;
    Json(HealthResponse {
        status: "ok",
        connected: monitor.is_connected(),
        evaluations: monitor.evaluations(),
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<SharedMonitor> {
    Router::new().route("/health", get(health))
}
