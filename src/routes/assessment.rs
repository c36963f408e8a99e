// src/routes/assessment.rs
//! Read-only views of the monitor: the current assessment and the rolling
//! risk history.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    presentation::{visible_history, Viewport},
    AlertBanner, AlertState, HistoryEntry, Monitor, RiskVerdict, SensorSnapshot,
    SharedMonitor,
};

// ---

pub fn router() -> Router<SharedMonitor> {
    // ---
    Router::new()
        .route("/assessment", get(assessment))
        .route("/history", get(history))
}

/// Current state of the station as one consistent view.
#[derive(Debug, Serialize)]
pub(super) struct AssessmentView {
    // ---
    connected: bool,
    evaluated: bool,
    evaluations: u64,
    alert: AlertState,
    banner: AlertBanner,
    snapshot: Option<SensorSnapshot>,
    prediction: Option<RiskVerdict>,
}

impl AssessmentView {
    pub(super) fn from_monitor(monitor: &Monitor) -> Self {
        // ---
        let latest = monitor.latest();
        AssessmentView {
            connected: monitor.is_connected(),
            evaluated: monitor.has_evaluated(),
            evaluations: monitor.evaluations(),
            alert: monitor.alert_state(),
            banner: monitor.alert_state().banner(),
            snapshot: latest.map(|a| a.snapshot.clone()),
            prediction: latest.map(|a| a.prediction.clone()),
        }
    }
}

async fn assessment(State(monitor): State<SharedMonitor>) -> Json<AssessmentView> {
    // ---
    let monitor = monitor.read().await;
    Json(AssessmentView::from_monitor(&monitor))
}

// ---

/// Optional client viewport width in pixels.
#[derive(Debug, Deserialize)]
struct HistoryQuery {
    width: Option<u32>,
}

#[derive(Debug, Serialize)]
struct HistoryView {
    viewport: Viewport,
    entries: Vec<HistoryEntry>,
}

async fn history(
    Query(params): Query<HistoryQuery>,
    State(monitor): State<SharedMonitor>,
) -> Json<HistoryView> {
    // ---
    let entries = monitor.read().await.history();
    let viewport = params.width.map_or(Viewport::Desktop, Viewport::from_width);
    debug!("GET /history - {} entries, viewport {:?}", entries.len(), viewport);

    Json(HistoryView {
        viewport,
        entries: visible_history(&entries, viewport).to_vec(),
    })
}
