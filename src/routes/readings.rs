// src/routes/readings.rs
//! Push ingestion of station snapshots.
//!
//! `POST /readings` accepts the same camelCase payload the feed poller reads.
//! An empty object or `null` is acknowledged with `202 Accepted` and not
//! evaluated. Any other object runs the engine and returns the new assessment;
//! a body that is not an object or carries mistyped fields gets
//! `422 Unprocessable Entity`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use tracing::{info, warn};

use super::assessment::AssessmentView;
use crate::{RawSensorSnapshot, SharedMonitor};

// ---

pub fn router() -> Router<SharedMonitor> {
    // ---
    Router::new().route("/readings", post(handler))
}

async fn handler(
    State(monitor): State<SharedMonitor>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    // ---
    let payload = match RawSensorSnapshot::from_payload(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("POST /readings - rejected payload: {}", e);
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(e.to_string())).into_response();
        }
    };

    let mut monitor = monitor.write().await;
    monitor.set_connected(true);

    let status = match monitor.ingest_payload(payload).map(|a| a.alert) {
        Some(alert) => {
            info!("POST /readings - evaluated, alert={}", alert);
            StatusCode::OK
        }
        None => {
            info!("POST /readings - empty payload, nothing evaluated");
            StatusCode::ACCEPTED
        }
    };

    (status, Json(AssessmentView::from_monitor(&monitor))).into_response()
}
