use serde::{Deserialize, Serialize};

/// Unit a performance distance was recorded in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DistanceUnit {
    Kilometers,
    Miles,
    Meters,
    /// Any other unit label; the value is used as-is
    Other(String),
}

impl DistanceUnit {
    pub fn as_str(&self) -> &str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mile",
            DistanceUnit::Meters => "m",
            DistanceUnit::Other(label) => label,
        }
    }
}

impl From<String> for DistanceUnit {
    fn from(label: String) -> Self {
        match label.as_str() {
            "km" => DistanceUnit::Kilometers,
            "mile" => DistanceUnit::Miles,
            "m" => DistanceUnit::Meters,
            _ => DistanceUnit::Other(label),
        }
    }
}

impl From<&str> for DistanceUnit {
    fn from(label: &str) -> Self {
        DistanceUnit::from(label.to_string())
    }
}

impl From<DistanceUnit> for String {
    fn from(unit: DistanceUnit) -> Self {
        unit.as_str().to_string()
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded race-equivalent performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Store-assigned identifier (None until persisted)
    #[serde(default)]
    pub id: Option<u64>,

    /// Owning user
    #[serde(default)]
    pub user_id: u64,

    /// Distance in `distance_unit`
    pub distance_value: f64,

    pub distance_unit: DistanceUnit,

    /// Clock-formatted duration, HH:MM:SS (hours unbounded)
    #[serde(rename = "time")]
    pub duration: String,

    /// Elevation in meters, echoed but not used by the model
    #[serde(default)]
    pub elevation: Option<f64>,

    /// Temperature in Celsius, echoed but not used by the model
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl PerformanceRecord {
    pub fn new(distance_value: f64, distance_unit: impl Into<DistanceUnit>, duration: impl Into<String>) -> Self {
        PerformanceRecord {
            id: None,
            user_id: 0,
            distance_value,
            distance_unit: distance_unit.into(),
            duration: duration.into(),
            elevation: None,
            temperature: None,
        }
    }

    pub fn with_user(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_conditions(mut self, elevation: Option<f64>, temperature: Option<f64>) -> Self {
        self.elevation = elevation;
        self.temperature = temperature;
        self
    }
}

/// Performance in canonical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPerformance {
    /// Distance in meters ("m" records stay in km-equivalent units)
    pub distance_meters: f64,
    /// Elapsed time in minutes
    pub time_minutes: f64,
}

/// Fitness estimate derived from one performance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessResult {
    /// Running velocity in meters per minute
    pub velocity: f64,
    /// Fraction of VO2max sustainable for the effort duration
    pub vo2max_fraction: f64,
    /// Rounded VDOT fitness index
    pub vdot: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_unit_labels() {
        assert_eq!(DistanceUnit::from("km"), DistanceUnit::Kilometers);
        assert_eq!(DistanceUnit::from("mile"), DistanceUnit::Miles);
        assert_eq!(DistanceUnit::from("m"), DistanceUnit::Meters);
        assert_eq!(DistanceUnit::from("yd"), DistanceUnit::Other("yd".to_string()));
        assert_eq!(DistanceUnit::Other("yd".to_string()).to_string(), "yd");
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{
            "id": 4,
            "user_id": 2,
            "distance_value": 10.0,
            "distance_unit": "km",
            "time": "00:40:00",
            "elevation": 120.5,
            "temperature": null
        }"#;

        let record: PerformanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(4));
        assert_eq!(record.distance_unit, DistanceUnit::Kilometers);
        assert_eq!(record.duration, "00:40:00");
        assert_eq!(record.elevation, Some(120.5));
        assert_eq!(record.temperature, None);

        let back = serde_json::to_string(&record).unwrap();
        assert!(back.contains("\"distance_unit\":\"km\""));
        assert!(back.contains("\"time\":\"00:40:00\""));
    }
}
