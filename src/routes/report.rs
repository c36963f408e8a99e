// src/routes/report.rs
//! Report export endpoint.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{report_filename, ReportFormat, SharedMonitor};

// ---

pub fn router() -> Router<SharedMonitor> {
    // ---
    Router::new().route("/report", get(handler))
}

/// `format` is one of `json`, `csv`, `txt`; defaults to `json`.
#[derive(Debug, Deserialize)]
struct ReportQuery {
    format: Option<String>,
}

async fn handler(
    Query(params): Query<ReportQuery>,
    State(monitor): State<SharedMonitor>,
) -> impl IntoResponse {
    // ---
    let format: ReportFormat = match params.format.as_deref().unwrap_or("json").parse() {
        Ok(format) => format,
        Err(e) => {
            warn!("GET /report - {}", e);
            return (StatusCode::BAD_REQUEST, Json(e.to_string())).into_response();
        }
    };

    // Rendered under the read guard so the snapshot and verdict come from the
    // same ingest.
    let body = monitor.read().await.render_report(format);
    let filename = report_filename(format, chrono::Utc::now().timestamp_millis());
    info!("GET /report - {} ({} bytes)", filename, body.len());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
