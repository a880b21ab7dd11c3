//! Unit normalization for recorded performances
//!
//! Converts a raw distance (value + unit) and a clock-formatted duration into
//! meters and minutes, the canonical units the fitness model works in.

use crate::error::{Result, VdotError};
use crate::models::{DistanceUnit, NormalizedPerformance, PerformanceRecord};
use tracing::{debug, warn};

/// Meters per kilometer
pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Meters per statute mile, as used throughout the race catalogues
pub const METERS_PER_MILE: f64 = 1609.34;

/// Normalize a full record into meters and minutes
pub fn normalize_record(record: &PerformanceRecord) -> Result<NormalizedPerformance> {
    normalize(record.distance_value, &record.distance_unit, &record.duration)
}

/// Normalize a distance/unit/duration triple into meters and minutes
pub fn normalize(
    distance_value: f64,
    distance_unit: &DistanceUnit,
    duration: &str,
) -> Result<NormalizedPerformance> {
    let distance_meters = normalize_distance(distance_value, distance_unit)?;
    let time_minutes = parse_duration(duration)?;

    debug!(distance_meters, time_minutes, unit = %distance_unit, "normalized performance");

    Ok(NormalizedPerformance {
        distance_meters,
        time_minutes,
    })
}

/// Convert a distance into meters.
///
/// `m` divides by 1000 instead of passing through, so meter records land in
/// km-equivalent units.
pub fn normalize_distance(distance_value: f64, distance_unit: &DistanceUnit) -> Result<f64> {
    if !distance_value.is_finite() || distance_value < 0.0 {
        return Err(VdotError::InvalidDistance(format!(
            "distance must be a non-negative number, got {}",
            distance_value
        )));
    }

    let converted = match distance_unit {
        DistanceUnit::Kilometers => distance_value * METERS_PER_KILOMETER,
        DistanceUnit::Miles => distance_value * METERS_PER_MILE,
        DistanceUnit::Meters => {
            warn!(distance_value, "meter distances are scaled by 1/1000");
            distance_value / METERS_PER_KILOMETER
        }
        DistanceUnit::Other(label) => {
            debug!(unit = %label, "unknown distance unit, using value unchanged");
            distance_value
        }
    };

    Ok(converted)
}

/// Parse an `HH:MM:SS` clock string into total minutes.
///
/// Each field is a non-negative integer with no range check, so `99:99:99`
/// is accepted.
pub fn parse_duration(duration: &str) -> Result<f64> {
    let tokens: Vec<&str> = duration.split(':').collect();
    if tokens.len() != 3 {
        warn!(value = duration, "duration parsing failed");
        return Err(VdotError::InvalidDuration(format!(
            "expected HH:MM:SS, got '{}'",
            duration
        )));
    }

    let mut fields = [0u64; 3];
    for (field, token) in fields.iter_mut().zip(&tokens) {
        *field = token.parse::<u64>().map_err(|_| {
            warn!(hh = tokens[0], mm = tokens[1], ss = tokens[2], "duration conversion failed");
            VdotError::InvalidDuration(format!("'{}' is not a whole number in '{}'", token, duration))
        })?;
    }

    let [hours, minutes, seconds] = fields;
    Ok(hours as f64 * 60.0 + minutes as f64 + seconds as f64 / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_distance_conversion() {
        assert_eq!(normalize_distance(10.0, &DistanceUnit::Kilometers).unwrap(), 10000.0);
        assert_eq!(normalize_distance(1.0, &DistanceUnit::Miles).unwrap(), 1609.34);
        assert_eq!(normalize_distance(5000.0, &DistanceUnit::Meters).unwrap(), 5.0);
        assert_eq!(
            normalize_distance(42.0, &DistanceUnit::Other("laps".to_string())).unwrap(),
            42.0
        );
    }

    #[test]
    fn test_negative_distance_rejected() {
        let err = normalize_distance(-1.0, &DistanceUnit::Kilometers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDistance);

        let err = normalize_distance(f64::NAN, &DistanceUnit::Kilometers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDistance);
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(parse_duration("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_duration("01:30:00").unwrap(), 90.0);
        assert_eq!(parse_duration("00:40:30").unwrap(), 40.5);
        assert_eq!(parse_duration("99:99:99").unwrap(), 99.0 * 60.0 + 99.0 + 99.0 / 60.0);
    }

    #[test]
    fn test_malformed_durations() {
        for bad in ["12:30", "aa:bb:cc", "", "01:02:03:04", "01:-2:03", "1.5:00:00"] {
            let err = parse_duration(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDuration, "input {:?}", bad);
        }
    }

    proptest! {
        #[test]
        fn test_kilometer_normalization(
            distance in 0.001f64..500.0,
            hours in 0u32..48,
            minutes in 0u32..60,
            seconds in 0u32..60
        ) {
            let duration = format!("{:02}:{:02}:{:02}", hours, minutes, seconds);
            let normalized = normalize(distance, &DistanceUnit::Kilometers, &duration).unwrap();

            prop_assert_eq!(normalized.distance_meters, distance * 1000.0);
            prop_assert_eq!(normalized.time_minutes, parse_duration(&duration).unwrap());
        }
    }
}
