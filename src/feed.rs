//! Sensor feed poller.
//!
//! Polls the station's latest-snapshot endpoint and hands changed payloads to
//! the monitor. Transport failures only flip the monitor's connected flag; the
//! next tick is the only retry.

use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::models::{RawSensorSnapshot, SensorSnapshot};
use crate::monitor::SharedMonitor;

/// Upper bound on a single feed request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---

/// Poll `url` every `interval_secs` seconds until the task is dropped.
pub async fn run(url: String, interval_secs: u32, monitor: SharedMonitor) -> Result<()> {
    // ---
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let mut ticker = tokio::time::interval(Duration::from_secs(u64::from(interval_secs)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Polling sensor feed every {}s", interval_secs);

    loop {
        ticker.tick().await;
        poll_once(&client, &url, &monitor).await;
    }
}

/// Run a single poll. A failed fetch or an undecodable body marks the feed
/// disconnected and leaves the latest assessment in place. Returns whether an
/// evaluation ran.
pub async fn poll_once(client: &reqwest::Client, url: &str, monitor: &SharedMonitor) -> bool {
    // ---
    match fetch_latest(client, url).await {
        Ok(payload) => apply_update(monitor, payload).await,
        Err(e) => {
            error!("Failed to fetch sensor data: {:#}", e);
            monitor.write().await.set_connected(false);
            false
        }
    }
}

/// Fetch the current payload. `Ok(None)` means the store holds no reading yet.
pub async fn fetch_latest(client: &reqwest::Client, url: &str) -> Result<Option<RawSensorSnapshot>> {
    // ---
    let response: serde_json::Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    debug!("Feed raw response: {}", response);
    parse_payload(response)
}

/// Decode a feed body; `null` and `{}` are an empty store, not an error.
pub fn parse_payload(value: serde_json::Value) -> Result<Option<RawSensorSnapshot>> {
    Ok(RawSensorSnapshot::from_payload(value)?)
}

/// Mark the feed connected and ingest the payload if it carries a reading that
/// differs from the latest one. Returns whether an evaluation ran.
pub async fn apply_update(monitor: &SharedMonitor, payload: Option<RawSensorSnapshot>) -> bool {
    // ---
    let mut monitor = monitor.write().await;
    monitor.set_connected(true);

    let Some(raw) = payload else {
        debug!("Feed holds no sensor data yet");
        return false;
    };

    let snapshot = SensorSnapshot::from(raw);
    if monitor.latest_snapshot() == Some(&snapshot) {
        debug!("Snapshot unchanged, skipping evaluation");
        return false;
    }

    monitor.ingest(snapshot);
    true
}
