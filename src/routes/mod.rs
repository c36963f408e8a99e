//! HTTP gateway. Each sibling module exports a subrouter over the
//! [`SharedMonitor`] state; `lib.rs` only sees [`router`].

use axum::Router;

use crate::SharedMonitor;

mod assessment;
mod health;
mod readings;
mod report;

// ---

pub fn router(monitor: SharedMonitor) -> Router {
    // ---
    Router::new()
        .merge(readings::router())
        .merge(assessment::router())
        .merge(report::router())
        .merge(health::router())
        .with_state(monitor)
}
