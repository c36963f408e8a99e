//! Data models for the landslide monitor.
//!
//! Wire payloads arrive as [`RawSensorSnapshot`] with every field optional and
//! are normalized into a fully populated [`SensorSnapshot`] before any scoring
//! code sees them. The verdict types produced by the engine live here as well so
//! the report serializer and the HTTP layer share one definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Sensor payload exactly as delivered by the station feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSensorSnapshot {
    // ---
    pub depth_moisture_percent: Option<f64>,
    pub surface_moisture_percent: Option<f64>,
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
    pub is_tilted: Option<bool>,
    pub tilt_count: Option<f64>,
    pub timestamp: Option<String>,
    pub heat_index: Option<f64>,
    pub needs_watering: Option<bool>,
}

impl RawSensorSnapshot {
    /// Decode a feed or push body.
    ///
    /// `null` and `{}` mean the store holds no reading yet and yield `Ok(None)`.
    /// Any object with at least one key is a reading, even when none of its
    /// keys are known or all of them are `null`.
    pub fn from_payload(value: serde_json::Value) -> serde_json::Result<Option<Self>> {
        // ---
        match &value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => Ok(None),
            _ => serde_json::from_value(value).map(Some),
        }
    }
}

/// Normalized sensor snapshot. Absent wire fields have been replaced by their
/// zero values, so scoring code never checks for absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSensorSnapshot")]
pub struct SensorSnapshot {
    // ---
    pub depth_moisture_percent: f64,
    pub surface_moisture_percent: f64,
    pub humidity: f64,
    pub temperature: f64,
    pub is_tilted: bool,
    /// Station counter as delivered; not coerced to an integer.
    pub tilt_count: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Carried through for display only; never scored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_index: Option<f64>,
    pub needs_watering: bool,
}

impl From<RawSensorSnapshot> for SensorSnapshot {
    fn from(raw: RawSensorSnapshot) -> Self {
        // ---
        SensorSnapshot {
            depth_moisture_percent: raw.depth_moisture_percent.unwrap_or(0.0),
            surface_moisture_percent: raw.surface_moisture_percent.unwrap_or(0.0),
            humidity: raw.humidity.unwrap_or(0.0),
            temperature: raw.temperature.unwrap_or(0.0),
            is_tilted: raw.is_tilted.unwrap_or(false),
            tilt_count: raw.tilt_count.unwrap_or(0.0),
            timestamp: raw.timestamp,
            heat_index: raw.heat_index,
            needs_watering: raw.needs_watering.unwrap_or(false),
        }
    }
}

// ---

/// Severity attached to a single contributing factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Categorical verdict level.
///
/// `Safe` is accepted on the wire for compatibility with older exports; the
/// classifier only ever yields the four scored levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLevel {
    Safe,
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
    Critical,
}

impl PredictionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionLevel::Safe => "Safe",
            PredictionLevel::LowRisk => "Low Risk",
            PredictionLevel::ModerateRisk => "Moderate Risk",
            PredictionLevel::HighRisk => "High Risk",
            PredictionLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for PredictionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule that fired during an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    // ---
    pub factor: String,
    pub severity: Severity,
    pub score: u32,
}

/// Result of evaluating one snapshot. `risk_score` always equals the sum of
/// the factor scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskVerdict {
    // ---
    pub risk_score: u32,
    pub prediction_level: PredictionLevel,
    pub timeframe: String,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
