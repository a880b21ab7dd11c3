//! Race time prediction
//!
//! Extrapolates one recorded performance to a fixed catalogue of race
//! distances with Riegel's endurance model, `T2 = T1 × (D2 / D1)^1.06`.

use crate::error::{CalculationError, Result, VdotError};
use crate::models::NormalizedPerformance;
use crate::pace_zones::MAX_FORMATTABLE_MINUTES;
use serde::Serialize;
use tracing::{debug, warn};

/// Riegel endurance exponent
pub const RIEGEL_EXPONENT: f64 = 1.06;

/// Distances closer than this (meters) count as the recorded distance
pub const DISTANCE_TOLERANCE: f64 = 1e-9;

/// A race in the prediction catalogue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceDistance {
    /// Name carried in predictions
    pub name: &'static str,
    /// Name shown in terminal tables
    pub display_name: &'static str,
    pub meters: f64,
}

/// Races in presentation order, longest first
pub const RACE_CATALOGUE: [RaceDistance; 15] = [
    RaceDistance { name: "マラソン", display_name: "Marathon", meters: 42195.0 },
    RaceDistance { name: "ハーフマラソン", display_name: "Half Marathon", meters: 21097.5 },
    RaceDistance { name: "30Km", display_name: "30Km", meters: 30000.0 },
    RaceDistance { name: "10Mile", display_name: "10Mile", meters: 16093.4 },
    RaceDistance { name: "15Km", display_name: "15Km", meters: 15000.0 },
    RaceDistance { name: "10Km", display_name: "10Km", meters: 10000.0 },
    RaceDistance { name: "8Km", display_name: "8Km", meters: 8000.0 },
    RaceDistance { name: "6Km", display_name: "6Km", meters: 6000.0 },
    RaceDistance { name: "5Km", display_name: "5Km", meters: 5000.0 },
    RaceDistance { name: "2Mile", display_name: "2Mile", meters: 3218.69 },
    RaceDistance { name: "3200m", display_name: "3200m", meters: 3200.0 },
    RaceDistance { name: "3Km", display_name: "3Km", meters: 3000.0 },
    RaceDistance { name: "1Mile", display_name: "1Mile", meters: 1609.34 },
    RaceDistance { name: "1600m", display_name: "1600m", meters: 1600.0 },
    RaceDistance { name: "1500m", display_name: "1500m", meters: 1500.0 },
];

/// Terminal label for a catalogue race name; unknown names pass through
pub fn display_name(race: &str) -> &str {
    RACE_CATALOGUE
        .iter()
        .find(|r| r.name == race)
        .map_or(race, |r| r.display_name)
}

/// Predicted result for one catalogue race
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RacePrediction {
    pub race: &'static str,
    /// `HH:MM:SS`, empty when the prediction is degenerate
    pub predicted_time: String,
    /// `mm:ss /km`, empty when the prediction is degenerate
    pub pace_per_km: String,
}

/// Predicted minutes for `race_meters` given a recorded performance
pub fn riegel_minutes(time_minutes: f64, distance_meters: f64, race_meters: f64) -> f64 {
    if (race_meters - distance_meters).abs() <= DISTANCE_TOLERANCE {
        time_minutes
    } else {
        time_minutes * (race_meters / distance_meters).powf(RIEGEL_EXPONENT)
    }
}

/// Format minutes as `HH:MM:SS`, rounding seconds and carrying overflow
pub fn try_format_clock(total_minutes: f64) -> std::result::Result<String, CalculationError> {
    if !total_minutes.is_finite() || !(0.0..MAX_FORMATTABLE_MINUTES).contains(&total_minutes) {
        return Err(CalculationError::DegeneratePace {
            calculation: "predicted time".to_string(),
            value: total_minutes,
        });
    }

    let mut hours = (total_minutes / 60.0) as i64;
    let remainder = total_minutes % 60.0;
    let mut minutes = remainder as i64;
    let mut seconds = ((remainder - minutes as f64) * 60.0).round() as i64;

    if seconds >= 60 {
        seconds -= 60;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        hours += 1;
    }

    Ok(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
}

/// Format the per-kilometer pace of a race as `mm:ss /km`, truncating both fields
pub fn try_format_pace_per_km(
    total_minutes: f64,
    race_meters: f64,
) -> std::result::Result<String, CalculationError> {
    let pace = total_minutes / (race_meters / 1000.0);
    if !pace.is_finite() || pace <= 0.0 || pace >= MAX_FORMATTABLE_MINUTES {
        return Err(CalculationError::DegeneratePace {
            calculation: "pace per km".to_string(),
            value: pace,
        });
    }

    let minutes = pace as i64;
    let seconds = ((pace - minutes as f64) * 60.0) as i64;
    Ok(format!("{:02}:{:02} /km", minutes, seconds))
}

fn absorb(result: std::result::Result<String, CalculationError>, race: &str) -> String {
    result.unwrap_or_else(|err| {
        warn!(race, %err, "degenerate race prediction");
        String::new()
    })
}

/// Predict every catalogue race from a normalized performance
pub fn predict(performance: &NormalizedPerformance) -> Result<Vec<RacePrediction>> {
    let NormalizedPerformance {
        distance_meters,
        time_minutes,
    } = *performance;

    if !distance_meters.is_finite() || distance_meters <= 0.0 {
        return Err(VdotError::InvalidDistance(format!(
            "race prediction needs a positive distance, got {}",
            distance_meters
        )));
    }

    let predictions = RACE_CATALOGUE
        .iter()
        .map(|race| {
            let minutes = riegel_minutes(time_minutes, distance_meters, race.meters);
            debug!(race = race.name, minutes, "predicted race time");

            RacePrediction {
                race: race.name,
                predicted_time: absorb(try_format_clock(minutes), race.name),
                pace_per_km: absorb(try_format_pace_per_km(minutes, race.meters), race.name),
            }
        })
        .collect();

    Ok(predictions)
}
