//! Landslide risk monitoring for a single sensor station.
//!
//! The core is synchronous and I/O free:
//! - [`models`] normalizes partial wire payloads into a [`SensorSnapshot`]
//! - [`engine`] scores a snapshot into a [`RiskVerdict`] and records history
//! - [`alert`] derives the coarse two-stage banner tier on its own scale
//! - [`history`] keeps the last ten verdict summaries
//! - [`report`] renders a snapshot and verdict as JSON, CSV or text
//!
//! [`monitor`] owns all of it behind one lock; [`feed`] and [`routes`] are the
//! transport boundary. The core modules import each other by module path; the
//! re-exports below are the public surface used by `routes`, the binary and
//! the integration tests.

pub mod alert;
pub mod config;
pub mod engine;
pub mod feed;
pub mod history;
pub mod models;
pub mod monitor;
pub mod presentation;
pub mod report;
pub mod routes;

pub use alert::{classify_alert, danger_score, AlertBanner, AlertState, AlertStateMachine};
pub use config::Config;
pub use engine::{assess, RiskEngine};
pub use history::{HistoryBuffer, HistoryEntry, HISTORY_CAPACITY};
pub use models::{PredictionLevel, RawSensorSnapshot, RiskFactor, RiskVerdict, SensorSnapshot, Severity};
pub use monitor::{Assessment, Monitor, SharedMonitor};
pub use report::{render_report, report_filename, Report, ReportFormat, SystemInfo};

/// Build the HTTP application around a shared monitor.
pub fn app(monitor: SharedMonitor) -> axum::Router {
    routes::router(monitor)
}
