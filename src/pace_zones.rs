//! Daniels training pace zones
//!
//! For each of the five training intensities (E, M, T, I, R) a pace range is
//! derived at eight standard training distances from the athlete's recorded
//! velocity. Zone and distance order is fixed and forms part of the output
//! contract, so both are literal arrays.

use crate::error::CalculationError;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, warn};

/// Training intensity zones in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingZone {
    /// E: easy / recovery running
    Easy,
    /// M: marathon race pace
    Marathon,
    /// T: threshold / tempo
    Threshold,
    /// I: VO2max intervals
    Interval,
    /// R: repetitions (speed and economy)
    Repetition,
}

impl TrainingZone {
    pub const ALL: [TrainingZone; 5] = [
        TrainingZone::Easy,
        TrainingZone::Marathon,
        TrainingZone::Threshold,
        TrainingZone::Interval,
        TrainingZone::Repetition,
    ];

    /// Short key used in reports
    pub fn label(&self) -> &'static str {
        match self {
            TrainingZone::Easy => "E",
            TrainingZone::Marathon => "M",
            TrainingZone::Threshold => "T",
            TrainingZone::Interval => "I",
            TrainingZone::Repetition => "R",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrainingZone::Easy => "Easy",
            TrainingZone::Marathon => "Marathon",
            TrainingZone::Threshold => "Threshold",
            TrainingZone::Interval => "Interval",
            TrainingZone::Repetition => "Repetition",
        }
    }

    /// Percent-of-velocity bounds `(lower, upper)`; an upper bound of 0 means
    /// the zone is a single target pace.
    pub fn intensity_bounds(&self) -> (f64, f64) {
        match self {
            TrainingZone::Easy => (70.0, 77.0),
            TrainingZone::Marathon => (88.0, 0.0),
            TrainingZone::Threshold => (92.5, 0.0),
            TrainingZone::Interval => (100.5, 0.0),
            TrainingZone::Repetition => (108.25, 0.0),
        }
    }
}

impl std::fmt::Display for TrainingZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A standard training distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDistance {
    pub label: &'static str,
    pub meters: f64,
}

/// Training distances in presentation order
pub const ZONE_DISTANCES: [ZoneDistance; 8] = [
    ZoneDistance { label: "1mi", meters: 1609.34 },
    ZoneDistance { label: "1Km", meters: 1000.0 },
    ZoneDistance { label: "1200m", meters: 1200.0 },
    ZoneDistance { label: "800m", meters: 800.0 },
    ZoneDistance { label: "600m", meters: 600.0 },
    ZoneDistance { label: "400m", meters: 400.0 },
    ZoneDistance { label: "300m", meters: 300.0 },
    ZoneDistance { label: "200m", meters: 200.0 },
];

/// Pace range for one zone at one distance, formatted `mm:ss`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaceRange {
    pub lower_pace: String,
    /// Empty for single-pace zones and degenerate cells
    pub upper_pace: String,
}

/// One distance cell; serializes as `{"<distance>": {lower_pace, upper_pace}}`
#[derive(Debug, Clone, PartialEq)]
pub struct DistancePace {
    pub distance: &'static str,
    pub pace: PaceRange,
}

impl Serialize for DistancePace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.distance, &self.pace)?;
        map.end()
    }
}

/// All distances for one zone; serializes as `{"<zone>": [cells...]}`
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePaces {
    pub zone: TrainingZone,
    pub distances: Vec<DistancePace>,
}

impl ZonePaces {
    pub fn pace_at(&self, distance: &str) -> Option<&PaceRange> {
        self.distances
            .iter()
            .find(|cell| cell.distance == distance)
            .map(|cell| &cell.pace)
    }
}

impl Serialize for ZonePaces {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.zone.label(), &self.distances)?;
        map.end()
    }
}

/// Ordered 5 × 8 table of training paces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PaceZoneTable {
    pub zones: Vec<ZonePaces>,
}

impl PaceZoneTable {
    pub fn zone(&self, zone: TrainingZone) -> Option<&ZonePaces> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    pub fn cell_count(&self) -> usize {
        self.zones.iter().map(|z| z.distances.len()).sum()
    }
}

/// Largest minute count whose fields still fit an `i64`
pub const MAX_FORMATTABLE_MINUTES: f64 = i64::MAX as f64;

/// Minutes needed to cover `distance_meters` at `intensity_percent` of `velocity`
pub fn calculate_pace(velocity: f64, intensity_percent: f64, distance_meters: f64) -> f64 {
    distance_meters / (velocity * (intensity_percent / 100.0))
}

/// Format a pace in minutes as `mm:ss`, truncating both fields
pub fn try_format_pace(pace: f64) -> Result<String, CalculationError> {
    if !pace.is_finite() || pace <= 0.0 || pace >= MAX_FORMATTABLE_MINUTES {
        return Err(CalculationError::DegeneratePace {
            calculation: "pace zone".to_string(),
            value: pace,
        });
    }

    let minutes = pace as i64;
    let seconds = ((pace - minutes as f64) * 60.0) as i64;
    Ok(format!("{:02}:{:02}", minutes, seconds))
}

/// Format a pace, absorbing degenerate values into an empty string
pub fn format_pace(pace: f64) -> String {
    try_format_pace(pace).unwrap_or_else(|err| {
        debug!(%err, "degenerate pace cell");
        String::new()
    })
}

/// Build the full pace table for a recorded velocity (m/min).
///
/// Never fails: degenerate cells come back as empty strings and the table
/// always has every zone and distance.
pub fn generate(velocity: f64) -> PaceZoneTable {
    let mut degenerate_cells = 0usize;

    let zones: Vec<ZonePaces> = TrainingZone::ALL
        .iter()
        .map(|&zone| {
            let (lower_bound, upper_bound) = zone.intensity_bounds();

            let distances = ZONE_DISTANCES
                .iter()
                .map(|distance| {
                    let lower_pace = format_pace(calculate_pace(velocity, lower_bound, distance.meters));
                    let upper_pace = if upper_bound != 0.0 {
                        format_pace(calculate_pace(velocity, upper_bound, distance.meters))
                    } else {
                        String::new()
                    };

                    if lower_pace.is_empty() {
                        degenerate_cells += 1;
                    }

                    DistancePace {
                        distance: distance.label,
                        pace: PaceRange {
                            lower_pace,
                            upper_pace,
                        },
                    }
                })
                .collect();

            ZonePaces { zone, distances }
        })
        .collect();

    if degenerate_cells > 0 {
        warn!(velocity, degenerate_cells, "pace table contains empty cells");
    }

    PaceZoneTable { zones }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_formatting() {
        assert_eq!(format_pace(5.714285714), "05:42");
        assert_eq!(format_pace(4.0), "04:00");
        assert_eq!(format_pace(12.999), "12:59");
        assert_eq!(format_pace(0.0), "");
        assert_eq!(format_pace(-3.0), "");
        assert_eq!(format_pace(f64::INFINITY), "");
        assert_eq!(format_pace(f64::NAN), "");
        assert_eq!(format_pace(1.0e20), "");
    }

    #[test]
    fn test_degenerate_pace_error() {
        let err = try_format_pace(0.0).unwrap_err();
        assert!(matches!(err, CalculationError::DegeneratePace { .. }));
    }

    #[test]
    fn test_table_shape_and_order() {
        let table = generate(250.0);

        let zone_labels: Vec<&str> = table.zones.iter().map(|z| z.zone.label()).collect();
        assert_eq!(zone_labels, vec!["E", "M", "T", "I", "R"]);
        assert_eq!(table.cell_count(), 40);

        for zone in &table.zones {
            let labels: Vec<&str> = zone.distances.iter().map(|d| d.distance).collect();
            assert_eq!(
                labels,
                vec!["1mi", "1Km", "1200m", "800m", "600m", "400m", "300m", "200m"]
            );
        }
    }

    #[test]
    fn test_single_pace_zones_have_no_upper_pace() {
        let table = generate(250.0);

        for zone in &table.zones {
            for cell in &zone.distances {
                assert!(!cell.pace.lower_pace.is_empty());
                if zone.zone == TrainingZone::Easy {
                    assert!(!cell.pace.upper_pace.is_empty());
                } else {
                    assert_eq!(cell.pace.upper_pace, "");
                }
            }
        }
    }

    #[test]
    fn test_known_paces_at_250_m_per_min() {
        let table = generate(250.0);

        let easy = table.zone(TrainingZone::Easy).unwrap();
        assert_eq!(easy.pace_at("1Km").unwrap().lower_pace, "05:42");
        assert_eq!(easy.pace_at("1Km").unwrap().upper_pace, "05:11");
        assert_eq!(easy.pace_at("1mi").unwrap().lower_pace, "09:11");

        let threshold = table.zone(TrainingZone::Threshold).unwrap();
        assert_eq!(threshold.pace_at("1Km").unwrap().lower_pace, "04:19");

        let reps = table.zone(TrainingZone::Repetition).unwrap();
        assert_eq!(reps.pace_at("200m").unwrap().lower_pace, "00:44");
    }

    #[test]
    fn test_zero_velocity_yields_empty_but_complete_table() {
        let table = generate(0.0);

        assert_eq!(table.zones.len(), 5);
        assert_eq!(table.cell_count(), 40);
        for zone in &table.zones {
            for cell in &zone.distances {
                assert_eq!(cell.pace.lower_pace, "");
                assert_eq!(cell.pace.upper_pace, "");
            }
        }
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(generate(250.0)).unwrap();

        let zones = json.as_array().unwrap();
        assert_eq!(zones.len(), 5);
        let easy = zones[0]["E"].as_array().unwrap();
        assert_eq!(easy.len(), 8);
        assert_eq!(easy[1]["1Km"]["lower_pace"], "05:42");
        assert_eq!(zones[1]["M"][0]["1mi"]["upper_pace"], "");
    }
}
