//! Risk scoring engine.
//!
//! [`assess`] is the pure rule table: every rule is evaluated, the ones that
//! fire contribute a [`RiskFactor`] in table order, and the verdict level is a
//! step function of the summed score. [`RiskEngine`] wraps it with the one side
//! effect an evaluation has: appending a summary to the rolling history.

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::history::{HistoryBuffer, HistoryEntry};
use crate::models::{PredictionLevel, RiskFactor, RiskVerdict, SensorSnapshot, Severity};

// ---

const CRITICAL_ADVICE: [&str; 4] = [
    "Evacuate immediately to designated safe zones",
    "Contact emergency services (Dial 112)",
    "Alert all residents in affected areas",
    "Do not return until authorities declare it safe",
];

const HIGH_RISK_ADVICE: [&str; 4] = [
    "Prepare for immediate evacuation",
    "Monitor weather and ground conditions closely",
    "Keep emergency supplies ready",
    "Stay alert for evacuation orders",
];

const MODERATE_RISK_ADVICE: [&str; 4] = [
    "Continue monitoring conditions",
    "Review evacuation routes and plans",
    "Avoid steep slopes and unstable areas",
    "Keep communication channels open",
];

const LOW_RISK_ADVICE: [&str; 4] = [
    "Continue routine monitoring",
    "Maintain drainage systems",
    "Regular sensor checks recommended",
    "Normal activities can continue",
];

// ---

/// Evaluate the rule table against a snapshot.
pub fn risk_factors(snapshot: &SensorSnapshot) -> Vec<RiskFactor> {
    // ---
    let mut factors = Vec::new();
    let mut fire = |factor: &str, severity: Severity, score: u32| {
        factors.push(RiskFactor {
            factor: factor.to_string(),
            severity,
            score,
        });
    };

    if snapshot.is_tilted {
        fire("Active Tilt", Severity::Critical, 25);
    }

    if snapshot.tilt_count > 5.0 {
        fire("High Tilt Frequency", Severity::High, 15);
    }

    if snapshot.surface_moisture_percent > 70.0 {
        fire("Saturated Surface", Severity::High, 20);
    } else if snapshot.surface_moisture_percent > 50.0 {
        fire("High Surface Moisture", Severity::Medium, 10);
    }

    if snapshot.depth_moisture_percent > 60.0 {
        fire("Deep Soil Saturation", Severity::High, 20);
    } else if snapshot.depth_moisture_percent > 45.0 {
        fire("Elevated Deep Moisture", Severity::Medium, 10);
    }

    if snapshot.humidity > 80.0 {
        fire("High Humidity", Severity::Medium, 10);
    }

    factors
}

/// Map a score onto its level and predicted event window.
///
/// Thresholds include their lower bound. The score is not clamped; the rule
/// table tops out at 90.
pub fn classify(risk_score: u32) -> (PredictionLevel, &'static str) {
    // ---
    if risk_score >= 60 {
        (PredictionLevel::Critical, "0-6 hours")
    } else if risk_score >= 40 {
        (PredictionLevel::HighRisk, "6-24 hours")
    } else if risk_score >= 20 {
        (PredictionLevel::ModerateRisk, "24-48 hours")
    } else {
        (PredictionLevel::LowRisk, "No immediate threat")
    }
}

/// Static safety guidance for a level, in display order.
pub fn recommendations(level: PredictionLevel) -> &'static [&'static str] {
    // ---
    match level {
        PredictionLevel::Critical => &CRITICAL_ADVICE,
        PredictionLevel::HighRisk => &HIGH_RISK_ADVICE,
        PredictionLevel::ModerateRisk => &MODERATE_RISK_ADVICE,
        PredictionLevel::LowRisk | PredictionLevel::Safe => &LOW_RISK_ADVICE,
    }
}

/// Build a verdict for `snapshot` stamped with `now`. No side effects.
pub fn assess(snapshot: &SensorSnapshot, now: DateTime<Utc>) -> RiskVerdict {
    // ---
    let risk_factors = risk_factors(snapshot);
    let risk_score = risk_factors.iter().map(|f| f.score).sum();
    let (prediction_level, timeframe) = classify(risk_score);

    RiskVerdict {
        risk_score,
        prediction_level,
        timeframe: timeframe.to_string(),
        risk_factors,
        recommendations: recommendations(prediction_level)
            .iter()
            .map(|r| r.to_string())
            .collect(),
        timestamp: now,
    }
}

// ---

/// Stateful wrapper that records every evaluation in a [`HistoryBuffer`].
#[derive(Debug, Default)]
pub struct RiskEngine {
    history: HistoryBuffer,
    evaluations: u64,
}

impl RiskEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a snapshot at the current instant.
    ///
    /// Appends a summary of the verdict to the history as part of the call.
    pub fn evaluate(&mut self, snapshot: &SensorSnapshot) -> RiskVerdict {
        self.evaluate_at(snapshot, Utc::now())
    }

    /// Same as [`RiskEngine::evaluate`] with an explicit evaluation instant.
    pub fn evaluate_at(&mut self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> RiskVerdict {
        // ---
        let verdict = assess(snapshot, now);

        self.history.append(HistoryEntry {
            score: verdict.risk_score,
            level: verdict.prediction_level,
            time: now.with_timezone(&Local).format("%H:%M:%S").to_string(),
        });
        self.evaluations += 1;

        debug!(
            "Evaluation #{}: score={} level={} factors={}",
            self.evaluations,
            verdict.risk_score,
            verdict.prediction_level,
            verdict.risk_factors.len()
        );

        verdict
    }

    /// Whether at least one evaluation has run.
    pub fn has_evaluated(&self) -> bool {
        self.evaluations > 0
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }
}
