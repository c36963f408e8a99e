//! Station monitor: the single owner of engine state.
//!
//! Each accepted snapshot runs the risk engine first and the alert state
//! machine second, then replaces the latest (snapshot, verdict) pair in one
//! step. Readers behind the shared lock therefore never see a verdict next to
//! a snapshot it was not computed from.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::alert::{AlertState, AlertStateMachine};
use crate::engine::RiskEngine;
use crate::history::HistoryEntry;
use crate::models::{RawSensorSnapshot, RiskVerdict, SensorSnapshot};
use crate::report::{Report, ReportFormat, SystemInfo};

/// Monitor handle shared between the HTTP routes and the feed poller.
pub type SharedMonitor = Arc<RwLock<Monitor>>;

/// Latest evaluated snapshot together with everything derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub snapshot: SensorSnapshot,
    pub prediction: RiskVerdict,
    pub alert: AlertState,
}

#[derive(Debug)]
pub struct Monitor {
    engine: RiskEngine,
    alerts: AlertStateMachine,
    latest: Option<Assessment>,
    connected: bool,
    system_info: SystemInfo,
}

impl Monitor {
    pub fn new(system_info: SystemInfo) -> Self {
        // ---
        Self {
            engine: RiskEngine::new(),
            alerts: AlertStateMachine::new(),
            latest: None,
            connected: true,
            system_info,
        }
    }

    pub fn shared(system_info: SystemInfo) -> SharedMonitor {
        Arc::new(RwLock::new(Self::new(system_info)))
    }

    /// Evaluate a normalized snapshot and make it the latest assessment.
    pub fn ingest(&mut self, snapshot: SensorSnapshot) -> &Assessment {
        // ---
        let prediction = self.engine.evaluate(&snapshot);
        let alert = self.alerts.update(&snapshot);

        if alert == AlertState::Critical {
            warn!(
                "Critical alert: risk score {} ({})",
                prediction.risk_score, prediction.prediction_level
            );
        }

        self.latest.insert(Assessment {
            snapshot,
            prediction,
            alert,
        })
    }

    /// Normalize and ingest a decoded payload. `None` (see
    /// [`RawSensorSnapshot::from_payload`]) leaves the monitor untouched.
    pub fn ingest_payload(&mut self, payload: Option<RawSensorSnapshot>) -> Option<&Assessment> {
        // ---
        let Some(raw) = payload else {
            debug!("Ignoring empty sensor payload");
            return None;
        };
        Some(self.ingest(SensorSnapshot::from(raw)))
    }

    pub fn latest(&self) -> Option<&Assessment> {
        self.latest.as_ref()
    }

    pub fn latest_snapshot(&self) -> Option<&SensorSnapshot> {
        self.latest.as_ref().map(|a| &a.snapshot)
    }

    pub fn alert_state(&self) -> AlertState {
        self.alerts.state()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.engine.history().to_vec()
    }

    pub fn has_evaluated(&self) -> bool {
        self.engine.has_evaluated()
    }

    pub fn evaluations(&self) -> u64 {
        self.engine.evaluations()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        // ---
        if self.connected != connected {
            if connected {
                info!("Sensor feed connected");
            } else {
                warn!("Sensor feed disconnected");
            }
        }
        self.connected = connected;
    }

    pub fn system_info(&self) -> &SystemInfo {
        &self.system_info
    }

    /// Build a report from the latest assessment, or from an empty snapshot
    /// with no verdict before the first evaluation.
    pub fn report(&self) -> Report {
        // ---
        let now = chrono::Local::now();
        match &self.latest {
            Some(a) => Report::new(&a.snapshot, Some(&a.prediction), &self.system_info, now),
            None => Report::new(&SensorSnapshot::default(), None, &self.system_info, now),
        }
    }

    pub fn render_report(&self, format: ReportFormat) -> String {
        self.report().render(format)
    }
}
