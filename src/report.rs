//! Report rendering.
//!
//! A [`Report`] bundles the latest snapshot, the verdict computed from it (if
//! any evaluation has run yet) and static station metadata. It renders to one
//! of three [`ReportFormat`]s. Rendering never fails on a missing verdict: the
//! scored fields fall back to `0`, `Unknown` and `N/A`.

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::{RiskVerdict, SensorSnapshot};

/// Report schema version stamped into every export.
pub const REPORT_VERSION: &str = "1.0.0";

const BANNER: &str = "===============================================";
const RULE: &str = "-----------------------------------------------";

// ---

/// Export encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Txt,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Txt => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Json => "application/json",
            ReportFormat::Csv => "text/csv",
            ReportFormat::Txt => "text/plain",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "txt" => Ok(ReportFormat::Txt),
            other => Err(anyhow!("Unsupported report format '{}' (expected json, csv or txt)", other)),
        }
    }
}

/// Download name for an export, e.g. `landslide-report-1717236000000.csv`.
pub fn report_filename(format: ReportFormat, epoch_ms: i64) -> String {
    format!("landslide-report-{}.{}", epoch_ms, format.extension())
}

// ---

/// Static metadata describing the reporting station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    pub location: String,
}

impl SystemInfo {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            location: location.into(),
        }
    }
}

/// Everything an export contains. The JSON encoding is this struct verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    // ---
    pub generated_at: String,
    pub sensor_data: SensorSnapshot,
    pub prediction: Option<RiskVerdict>,
    pub system_info: SystemInfo,
}

impl Report {
    pub fn new(
        snapshot: &SensorSnapshot,
        verdict: Option<&RiskVerdict>,
        system_info: &SystemInfo,
        generated_at: DateTime<Local>,
    ) -> Self {
        // ---
        Report {
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            sensor_data: snapshot.clone(),
            prediction: verdict.cloned(),
            system_info: system_info.clone(),
        }
    }

    /// Encode the report.
    ///
    /// # Panics
    ///
    /// If the report cannot be serialized to JSON. Every field is a plain
    /// scalar, string or list, so this indicates a broken model type.
    pub fn render(&self, format: ReportFormat) -> String {
        // ---
        match format {
            ReportFormat::Json => {
                serde_json::to_string_pretty(self).expect("report model must serialize to JSON")
            }
            ReportFormat::Csv => self.to_csv(),
            ReportFormat::Txt => self.to_text(),
        }
    }

    fn risk_score(&self) -> u32 {
        self.prediction.as_ref().map_or(0, |p| p.risk_score)
    }

    fn risk_level(&self) -> &str {
        self.prediction
            .as_ref()
            .map_or("Unknown", |p| p.prediction_level.as_str())
    }

    fn timeframe(&self) -> &str {
        self.prediction
            .as_ref()
            .map_or("N/A", |p| p.timeframe.as_str())
    }

    fn to_csv(&self) -> String {
        // ---
        let s = &self.sensor_data;
        let rows = [
            ("Generated At", self.generated_at.clone()),
            ("Temperature", reading(s.temperature)),
            ("Humidity", reading(s.humidity)),
            ("Surface Moisture", reading(s.surface_moisture_percent)),
            ("Depth Moisture", reading(s.depth_moisture_percent)),
            ("Is Tilted", yes_no(s.is_tilted).to_string()),
            ("Tilt Count", s.tilt_count.to_string()),
        ];

        let mut csv = String::from("Landslide Monitoring Report\n\nParameter,Value\n");
        for (key, value) in rows {
            let _ = writeln!(csv, "{},{}", key, value);
        }
        csv.push_str("\nPrediction Analysis\n");
        let _ = writeln!(csv, "Risk Score,{}", self.risk_score());
        let _ = writeln!(csv, "Risk Level,{}", self.risk_level());
        let _ = writeln!(csv, "Timeframe,{}", self.timeframe());
        csv
    }

    fn to_text(&self) -> String {
        // ---
        let s = &self.sensor_data;
        let mut txt = String::new();

        let _ = writeln!(txt, "{}", BANNER);
        let _ = writeln!(txt, "    LANDSLIDE MONITORING SYSTEM REPORT");
        let _ = writeln!(txt, "{}\n", BANNER);
        let _ = writeln!(txt, "Generated: {}", self.generated_at);
        let _ = writeln!(txt, "System Version: {}", self.system_info.version);
        let _ = writeln!(txt, "Location: {}\n", self.system_info.location);

        section(&mut txt, "SENSOR READINGS");
        let _ = writeln!(txt, "Temperature: {} °C", reading(s.temperature));
        let _ = writeln!(txt, "Humidity: {} %", reading(s.humidity));
        let _ = writeln!(txt, "Surface Moisture: {} %", reading(s.surface_moisture_percent));
        let _ = writeln!(txt, "Depth Moisture: {} %", reading(s.depth_moisture_percent));
        let _ = writeln!(
            txt,
            "Tilt Status: {}",
            if s.is_tilted { "ACTIVE" } else { "STABLE" }
        );
        let _ = writeln!(txt, "Tilt Count: {}\n", s.tilt_count);

        section(&mut txt, "RISK ANALYSIS");
        let _ = writeln!(txt, "Risk Score: {}/100", self.risk_score());
        let _ = writeln!(txt, "Risk Level: {}", self.risk_level());
        let _ = writeln!(txt, "Predicted Timeframe: {}\n", self.timeframe());

        if let Some(prediction) = &self.prediction {
            if !prediction.risk_factors.is_empty() {
                txt.push_str("Risk Factors Detected:\n");
                for (idx, factor) in prediction.risk_factors.iter().enumerate() {
                    let _ = writeln!(
                        txt,
                        "  {}. {} ({}) - Score: {}",
                        idx + 1,
                        factor.factor,
                        factor.severity.as_str(),
                        factor.score
                    );
                }
                txt.push('\n');
            }

            if !prediction.recommendations.is_empty() {
                txt.push_str("RECOMMENDATIONS:\n");
                for (idx, rec) in prediction.recommendations.iter().enumerate() {
                    let _ = writeln!(txt, "  {}. {}", idx + 1, rec);
                }
            }
        }

        let _ = writeln!(txt, "\n{}", BANNER);
        let _ = writeln!(txt, "           END OF REPORT");
        let _ = writeln!(txt, "{}", BANNER);
        txt
    }
}

/// Render `snapshot` and `verdict` in `format`, stamped with the current local time.
pub fn render_report(
    snapshot: &SensorSnapshot,
    verdict: Option<&RiskVerdict>,
    format: ReportFormat,
    system_info: &SystemInfo,
) -> String {
    Report::new(snapshot, verdict, system_info, Local::now()).render(format)
}

// ---

fn section(txt: &mut String, title: &str) {
    let _ = writeln!(txt, "{}\n{}\n{}", RULE, title, RULE);
}

/// Zero and absent readings are indistinguishable after normalization; both
/// print as `N/A`.
fn reading(value: f64) -> String {
    if value == 0.0 {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::engine;
    use chrono::{TimeZone, Utc};

    fn create_test_snapshot() -> SensorSnapshot {
        // ---
        SensorSnapshot {
            depth_moisture_percent: 65.0,
            surface_moisture_percent: 75.0,
            humidity: 85.0,
            temperature: 20.5,
            is_tilted: true,
            tilt_count: 7.0,
            timestamp: Some("2025-06-01T10:00:00Z".to_string()),
            heat_index: None,
            needs_watering: false,
        }
    }

    fn create_test_report(with_verdict: bool) -> Report {
        // ---
        let snapshot = create_test_snapshot();
        let verdict = engine::assess(&snapshot, Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 5).unwrap());
        let generated_at = Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();

        Report::new(
            &snapshot,
            with_verdict.then_some(&verdict),
            &SystemInfo::new("Monitoring Station Alpha"),
            generated_at,
        )
    }

    #[test]
    fn test_format_parsing_and_contracts() {
        // ---
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("txt".parse::<ReportFormat>().unwrap(), ReportFormat::Txt);
        assert!("pdf".parse::<ReportFormat>().is_err());

        assert_eq!(ReportFormat::Json.mime_type(), "application/json");
        assert_eq!(ReportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ReportFormat::Txt.mime_type(), "text/plain");
        assert_eq!(
            report_filename(ReportFormat::Csv, 1717236000000),
            "landslide-report-1717236000000.csv"
        );
    }

    #[test]
    fn test_json_round_trip() {
        // ---
        let report = create_test_report(true);
        let json = report.render(ReportFormat::Json);
        let parsed: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.sensor_data, report.sensor_data);
        assert_eq!(parsed.prediction, report.prediction);
        assert_eq!(parsed, report);
        assert_eq!(parsed.system_info.version, "1.0.0");
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        // ---
        let json = create_test_report(true).render(ReportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sensorData"]["surfaceMoisturePercent"], 75.0);
        assert_eq!(value["prediction"]["riskScore"], 90);
        assert_eq!(value["prediction"]["predictionLevel"], "Critical");
        assert_eq!(value["prediction"]["riskFactors"][0]["factor"], "Active Tilt");
        assert_eq!(value["systemInfo"]["location"], "Monitoring Station Alpha");
    }

    #[test]
    fn test_csv_layout() {
        // ---
        let csv = create_test_report(true).render(ReportFormat::Csv);
        let expected = "Landslide Monitoring Report\n\
                        \n\
                        Parameter,Value\n\
                        Generated At,2025-06-01 12:30:00\n\
                        Temperature,20.5\n\
                        Humidity,85\n\
                        Surface Moisture,75\n\
                        Depth Moisture,65\n\
                        Is Tilted,Yes\n\
                        Tilt Count,7\n\
                        \n\
                        Prediction Analysis\n\
                        Risk Score,90\n\
                        Risk Level,Critical\n\
                        Timeframe,0-6 hours\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_csv_missing_readings() {
        // ---
        let report = Report::new(
            &SensorSnapshot::default(),
            None,
            &SystemInfo::new("Station"),
            Local::now(),
        );
        let csv = report.render(ReportFormat::Csv);

        assert!(csv.contains("Temperature,N/A\n"));
        assert!(csv.contains("Depth Moisture,N/A\n"));
        assert!(csv.contains("Is Tilted,No\n"));
        assert!(csv.contains("Tilt Count,0\n"));
        assert!(csv.contains("Risk Score,0\n"));
        assert!(csv.contains("Risk Level,Unknown\n"));
        assert!(csv.contains("Timeframe,N/A\n"));
    }

    #[test]
    fn test_text_report_sections() {
        // ---
        let txt = create_test_report(true).render(ReportFormat::Txt);

        assert!(txt.starts_with(BANNER));
        assert!(txt.contains("    LANDSLIDE MONITORING SYSTEM REPORT\n"));
        assert!(txt.contains("Location: Monitoring Station Alpha\n"));
        assert!(txt.contains("SENSOR READINGS\n"));
        assert!(txt.contains("Temperature: 20.5 °C\n"));
        assert!(txt.contains("Tilt Status: ACTIVE\n"));
        assert!(txt.contains("Risk Score: 90/100\n"));
        assert!(txt.contains("Predicted Timeframe: 0-6 hours\n"));
        assert!(txt.contains("Risk Factors Detected:\n  1. Active Tilt (Critical) - Score: 25\n"));
        assert!(txt.contains("  5. High Humidity (Medium) - Score: 10\n"));
        assert!(txt.contains("RECOMMENDATIONS:\n  1. Evacuate immediately to designated safe zones\n"));
        assert!(txt.ends_with(&format!("           END OF REPORT\n{}\n", BANNER)));
    }

    #[test]
    fn test_text_report_omits_empty_factor_list() {
        // ---
        let calm = SensorSnapshot {
            temperature: 18.0,
            ..SensorSnapshot::default()
        };
        let verdict = engine::assess(&calm, Utc::now());
        let txt = Report::new(&calm, Some(&verdict), &SystemInfo::new("Station"), Local::now())
            .render(ReportFormat::Txt);

        assert!(!txt.contains("Risk Factors Detected"));
        assert!(txt.contains("RECOMMENDATIONS:\n  1. Continue routine monitoring\n"));
        assert!(txt.contains("Risk Level: Low Risk\n"));
    }

    #[test]
    fn test_all_formats_render_without_verdict() {
        // ---
        let report = create_test_report(false);

        let json = report.render(ReportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["prediction"].is_null());

        let csv = report.render(ReportFormat::Csv);
        assert!(csv.contains("Risk Score,0\nRisk Level,Unknown\nTimeframe,N/A\n"));

        let txt = report.render(ReportFormat::Txt);
        assert!(txt.contains("Risk Score: 0/100\n"));
        assert!(txt.contains("Risk Level: Unknown\n"));
        assert!(txt.contains("Predicted Timeframe: N/A\n"));
        assert!(!txt.contains("RECOMMENDATIONS:"));
        assert!(txt.contains("END OF REPORT"));
    }

    #[test]
    fn test_render_report_entry_point() {
        // ---
        let snapshot = create_test_snapshot();
        let csv = render_report(&snapshot, None, ReportFormat::Csv, &SystemInfo::new("Station"));
        assert!(csv.starts_with("Landslide Monitoring Report\n"));
        assert!(csv.contains("Is Tilted,Yes\n"));
    }
}
