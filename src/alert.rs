//! Coarse two-stage alerting.
//!
//! Scores the same snapshot as the risk engine but on its own small integer
//! scale with its own thresholds. The two are separate consumers (banner vs.
//! detailed report) and are not meant to agree.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::SensorSnapshot;

// ---

/// Banner tier shown to operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    #[default]
    Safe,
    Warning,
    Critical,
}

/// Operator-facing copy for an alert tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertBanner {
    pub title: &'static str,
    pub description: &'static str,
    /// Absent while safe.
    pub stage: Option<AlertStage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertStage {
    pub headline: &'static str,
    pub instruction: &'static str,
}

impl AlertState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertState::Safe => "safe",
            AlertState::Warning => "warning",
            AlertState::Critical => "critical",
        }
    }

    pub fn banner(&self) -> AlertBanner {
        // ---
        match self {
            AlertState::Critical => AlertBanner {
                title: "CRITICAL ALERT - Immediate Evacuation Required",
                description: "High landslide risk detected. Take immediate action!",
                stage: Some(AlertStage {
                    headline: "STAGE 2 ALERT: Multiple risk factors detected",
                    instruction: "Contact emergency services and evacuate to safe zones immediately.",
                }),
            },
            AlertState::Warning => AlertBanner {
                title: "WARNING - Unstable Conditions Detected",
                description: "Elevated landslide risk. Monitor closely and prepare for evacuation.",
                stage: Some(AlertStage {
                    headline: "STAGE 1 ALERT: Warning conditions detected",
                    instruction: "Stay alert and prepare emergency evacuation plan.",
                }),
            },
            AlertState::Safe => AlertBanner {
                title: "SAFE - Normal Conditions",
                description: "All parameters within safe range.",
                stage: None,
            },
        }
    }
}

impl std::fmt::Display for AlertState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Danger points for a snapshot, 0..=6.
pub fn danger_score(snapshot: &SensorSnapshot) -> u8 {
    // ---
    let mut score = 0;

    if snapshot.is_tilted {
        score += 2;
    }
    if snapshot.tilt_count > 5.0 {
        score += 1;
    }
    if snapshot.surface_moisture_percent > 70.0 {
        score += 1;
    }
    if snapshot.depth_moisture_percent > 60.0 {
        score += 1;
    }
    if snapshot.humidity > 80.0 {
        score += 1;
    }

    score
}

pub fn classify_alert(snapshot: &SensorSnapshot) -> AlertState {
    // ---
    match danger_score(snapshot) {
        s if s >= 3 => AlertState::Critical,
        2 => AlertState::Warning,
        _ => AlertState::Safe,
    }
}

/// Holds the current tier. Every snapshot replaces it outright; there is no
/// hysteresis or dwell time.
#[derive(Debug, Default)]
pub struct AlertStateMachine {
    state: AlertState,
}

impl AlertStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn update(&mut self, snapshot: &SensorSnapshot) -> AlertState {
        // ---
        let next = classify_alert(snapshot);

        if next > self.state {
            warn!(
                "Alert escalated {} -> {} (danger score {})",
                self.state,
                next,
                danger_score(snapshot)
            );
        } else if next < self.state {
            info!("Alert relaxed {} -> {}", self.state, next);
        }

        self.state = next;
        next
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::engine;
    use crate::models::PredictionLevel;
    use chrono::Utc;

    fn create_test_snapshot(
        is_tilted: bool,
        tilt_count: f64,
        surface: f64,
        depth: f64,
        humidity: f64,
    ) -> SensorSnapshot {
        // ---
        SensorSnapshot {
            depth_moisture_percent: depth,
            surface_moisture_percent: surface,
            humidity,
            is_tilted,
            tilt_count,
            ..SensorSnapshot::default()
        }
    }

    #[test]
    fn test_max_danger_is_critical() {
        // ---
        let snapshot = create_test_snapshot(true, 7.0, 75.0, 65.0, 85.0);
        assert_eq!(danger_score(&snapshot), 6);
        assert_eq!(classify_alert(&snapshot), AlertState::Critical);
    }

    #[test]
    fn test_thresholds() {
        // ---
        assert_eq!(classify_alert(&SensorSnapshot::default()), AlertState::Safe);

        let one = create_test_snapshot(false, 6.0, 0.0, 0.0, 0.0);
        assert_eq!(danger_score(&one), 1);
        assert_eq!(classify_alert(&one), AlertState::Safe);

        let two = create_test_snapshot(false, 0.0, 71.0, 61.0, 0.0);
        assert_eq!(danger_score(&two), 2);
        assert_eq!(classify_alert(&two), AlertState::Warning);

        let three = create_test_snapshot(false, 6.0, 71.0, 0.0, 81.0);
        assert_eq!(danger_score(&three), 3);
        assert_eq!(classify_alert(&three), AlertState::Critical);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        // ---
        let snapshot = create_test_snapshot(false, 5.0, 70.0, 60.0, 80.0);
        assert_eq!(danger_score(&snapshot), 0);
    }

    #[test]
    fn test_scale_differs_from_risk_engine() {
        // ---
        let tilt_only = create_test_snapshot(true, 0.0, 0.0, 0.0, 0.0);

        assert_eq!(danger_score(&tilt_only), 2);
        assert_eq!(classify_alert(&tilt_only), AlertState::Warning);

        let verdict = engine::assess(&tilt_only, Utc::now());
        assert_eq!(verdict.risk_score, 25);
        assert_eq!(verdict.prediction_level, PredictionLevel::ModerateRisk);
    }

    #[test]
    fn test_state_flips_without_debounce() {
        // ---
        let mut machine = AlertStateMachine::new();
        assert_eq!(machine.state(), AlertState::Safe);

        let noisy = create_test_snapshot(true, 7.0, 75.0, 65.0, 85.0);
        assert_eq!(machine.update(&noisy), AlertState::Critical);
        assert_eq!(machine.update(&SensorSnapshot::default()), AlertState::Safe);
        assert_eq!(machine.update(&noisy), AlertState::Critical);
        assert_eq!(machine.state(), AlertState::Critical);
    }

    #[test]
    fn test_banner_copy() {
        // ---
        assert!(AlertState::Safe.banner().stage.is_none());
        assert_eq!(
            AlertState::Critical.banner().title,
            "CRITICAL ALERT - Immediate Evacuation Required"
        );
        assert_eq!(
            AlertState::Warning.banner().stage.map(|s| s.headline),
            Some("STAGE 1 ALERT: Warning conditions detected")
        );
        assert_eq!(serde_json::to_string(&AlertState::Warning).unwrap(), "\"warning\"");
    }
}
