//! VDOT calculation engine
//!
//! Runs one performance through the whole derivation chain:
//!
//! ```text
//! record ─► units::normalize ─► fitness::estimate ─► pace_zones::generate(velocity)
//!                     │
//!                     └──────────────────────────► race_prediction::predict(distance, time)
//! ```
//!
//! Normalization and estimation failures abort the calculation. Degenerate
//! cells in the pace or race tables come back as empty strings instead.
//! The engine holds no state and is safe to call from any number of threads.

use crate::error::{Result, VdotError};
use crate::fitness;
use crate::models::{DistanceUnit, FitnessResult, NormalizedPerformance, PerformanceRecord};
use crate::pace_zones::{self, PaceZoneTable};
use crate::race_prediction::{self, RacePrediction};
use crate::units;
use serde::Serialize;
use tracing::{info, instrument};

/// Everything derived from a normalized performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    #[serde(skip)]
    pub normalized: NormalizedPerformance,

    #[serde(rename = "VDOT")]
    pub vdot: i64,

    /// Meters per minute
    pub velocity: f64,

    pub vo2max_fraction: f64,

    pub pace_zones: PaceZoneTable,

    pub race_times: Vec<RacePrediction>,
}

impl PerformanceAnalysis {
    pub fn fitness(&self) -> FitnessResult {
        FitnessResult {
            velocity: self.velocity,
            vo2max_fraction: self.vo2max_fraction,
            vdot: self.vdot,
        }
    }
}

/// Response payload: the echoed record plus its analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VdotReport {
    pub id: Option<u64>,

    #[serde(rename = "distanceValue")]
    pub distance_value: f64,

    #[serde(rename = "distanceUnit")]
    pub distance_unit: DistanceUnit,

    #[serde(rename = "time")]
    pub duration: String,

    pub elevation: Option<f64>,

    pub temperature: Option<f64>,

    #[serde(flatten)]
    pub analysis: PerformanceAnalysis,
}

/// Stateless entry point to the calculation chain
pub struct VdotEngine;

impl VdotEngine {
    /// Analyze a recorded performance and echo its fields into the report
    #[instrument(skip_all, fields(record_id = ?record.id, user_id = record.user_id))]
    pub fn analyze(record: &PerformanceRecord) -> Result<VdotReport> {
        let normalized = units::normalize_record(record)?;
        let analysis = Self::analyze_normalized(&normalized)?;

        info!(
            vdot = analysis.vdot,
            distance = record.distance_value,
            unit = %record.distance_unit,
            time = %record.duration,
            "calculated VDOT"
        );

        Ok(VdotReport {
            id: record.id,
            distance_value: record.distance_value,
            distance_unit: record.distance_unit.clone(),
            duration: record.duration.clone(),
            elevation: record.elevation,
            temperature: record.temperature,
            analysis,
        })
    }

    /// Analyze a performance already in meters and minutes
    pub fn analyze_normalized(performance: &NormalizedPerformance) -> Result<PerformanceAnalysis> {
        if !performance.distance_meters.is_finite() || performance.distance_meters <= 0.0 {
            return Err(VdotError::InvalidDistance(format!(
                "distance must be greater than zero, got {}",
                performance.distance_meters
            )));
        }
        if !performance.time_minutes.is_finite() || performance.time_minutes < 0.0 {
            return Err(VdotError::InvalidDuration(format!(
                "time must be a non-negative number of minutes, got {}",
                performance.time_minutes
            )));
        }

        let fitness = fitness::estimate(performance)?;
        let pace_zones = pace_zones::generate(fitness.velocity);
        let race_times = race_prediction::predict(performance)?;

        Ok(PerformanceAnalysis {
            normalized: *performance,
            vdot: fitness.vdot,
            velocity: fitness.velocity,
            vo2max_fraction: fitness.vo2max_fraction,
            pace_zones,
            race_times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pace_zones::TrainingZone;

    #[test]
    fn test_ten_k_report() {
        let record = PerformanceRecord::new(10.0, "km", "00:40:00");
        let report = VdotEngine::analyze(&record).unwrap();

        assert_eq!(report.analysis.normalized.distance_meters, 10000.0);
        assert_eq!(report.analysis.normalized.time_minutes, 40.0);
        assert_eq!(report.analysis.velocity, 250.0);
        assert_eq!(report.analysis.vdot, 52);

        let easy = report.analysis.pace_zones.zone(TrainingZone::Easy).unwrap();
        assert_eq!(easy.pace_at("1Km").unwrap().lower_pace, "05:42");
    }

    #[test]
    fn test_conditions_are_echoed() {
        let record = PerformanceRecord::new(5.0, "km", "00:20:00")
            .with_user(3)
            .with_conditions(Some(350.0), Some(28.5));
        let report = VdotEngine::analyze(&record).unwrap();

        assert_eq!(report.elevation, Some(350.0));
        assert_eq!(report.temperature, Some(28.5));

        let plain = VdotEngine::analyze(&PerformanceRecord::new(5.0, "km", "00:20:00")).unwrap();
        assert_eq!(plain.analysis, report.analysis);
    }

    #[test]
    fn test_errors_abort_the_calculation() {
        let err = VdotEngine::analyze(&PerformanceRecord::new(10.0, "km", "40:00")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDuration);

        let err = VdotEngine::analyze(&PerformanceRecord::new(-1.0, "km", "00:40:00")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDistance);

        let err = VdotEngine::analyze(&PerformanceRecord::new(0.0, "km", "00:40:00")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDistance);

        let err = VdotEngine::analyze(&PerformanceRecord::new(10.0, "km", "00:00:00")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_report_json_keys() {
        let record = PerformanceRecord {
            id: Some(11),
            ..PerformanceRecord::new(10.0, "km", "00:40:00")
        };
        let json = serde_json::to_value(VdotEngine::analyze(&record).unwrap()).unwrap();

        assert_eq!(json["id"], 11);
        assert_eq!(json["distanceValue"], 10.0);
        assert_eq!(json["distanceUnit"], "km");
        assert_eq!(json["time"], "00:40:00");
        assert!(json["elevation"].is_null());
        assert_eq!(json["VDOT"], 52);
        assert_eq!(json["pace_zones"].as_array().unwrap().len(), 5);
        assert_eq!(json["race_times"].as_array().unwrap().len(), 15);
        assert_eq!(json["race_times"][5]["race"], "10Km");
        assert_eq!(json["race_times"][5]["predicted_time"], "00:40:00");
        assert!(json.get("normalized").is_none());
    }
}
