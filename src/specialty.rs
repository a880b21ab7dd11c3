//! Specialty events: an athlete's personal bests
//!
//! A personal best is stored as an event name plus the best time, written
//! either on the clock (`2:22:25`) or in track notation (`4'12"11`, minutes,
//! seconds and optional hundredths). Both forms are converted to minutes so a
//! personal best can be fed straight into the VDOT engine.

use crate::engine::{PerformanceAnalysis, VdotEngine};
use crate::error::{Result, VdotError};
use crate::models::NormalizedPerformance;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Events a personal best can be recorded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "800m")]
    M800,
    #[serde(rename = "1500m")]
    M1500,
    #[serde(rename = "1mile")]
    Mile,
    #[serde(rename = "3000m")]
    M3000,
    #[serde(rename = "3000mSC")]
    Steeplechase3000,
    #[serde(rename = "2mile")]
    TwoMile,
    #[serde(rename = "5000m")]
    M5000,
    #[serde(rename = "10000m")]
    M10000,
    #[serde(rename = "ハーフマラソン", alias = "half_marathon")]
    HalfMarathon,
    #[serde(rename = "フルマラソン", alias = "marathon")]
    Marathon,
}

impl EventName {
    pub const ALL: [EventName; 10] = [
        EventName::M800,
        EventName::M1500,
        EventName::Mile,
        EventName::M3000,
        EventName::Steeplechase3000,
        EventName::TwoMile,
        EventName::M5000,
        EventName::M10000,
        EventName::HalfMarathon,
        EventName::Marathon,
    ];

    /// Stored label
    pub fn label(&self) -> &'static str {
        match self {
            EventName::M800 => "800m",
            EventName::M1500 => "1500m",
            EventName::Mile => "1mile",
            EventName::M3000 => "3000m",
            EventName::Steeplechase3000 => "3000mSC",
            EventName::TwoMile => "2mile",
            EventName::M5000 => "5000m",
            EventName::M10000 => "10000m",
            EventName::HalfMarathon => "ハーフマラソン",
            EventName::Marathon => "フルマラソン",
        }
    }

    /// Race distance in meters; the steeplechase counts as a flat 3000m
    pub fn distance_meters(&self) -> f64 {
        match self {
            EventName::M800 => 800.0,
            EventName::M1500 => 1500.0,
            EventName::Mile => 1609.34,
            EventName::M3000 | EventName::Steeplechase3000 => 3000.0,
            EventName::TwoMile => 3218.69,
            EventName::M5000 => 5000.0,
            EventName::M10000 => 10000.0,
            EventName::HalfMarathon => 21097.5,
            EventName::Marathon => 42195.0,
        }
    }
}

impl std::str::FromStr for EventName {
    type Err = VdotError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        EventName::ALL
            .iter()
            .copied()
            .find(|event| event.label().eq_ignore_ascii_case(wanted))
            .or(match wanted.to_lowercase().as_str() {
                "half_marathon" | "half" => Some(EventName::HalfMarathon),
                "marathon" | "full_marathon" => Some(EventName::Marathon),
                _ => None,
            })
            .ok_or_else(|| VdotError::InvalidDistance(format!("unknown event: {}", s)))
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A personal best for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyEvent {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub user_id: u64,

    pub event_name: EventName,

    /// `h:mm:ss` or `m'ss"` with optional hundredths
    pub best_time: String,

    pub recorded_at: NaiveDate,
}

impl SpecialtyEvent {
    pub fn best_time_minutes(&self) -> Result<f64> {
        parse_best_time(&self.best_time)
    }

    pub fn to_normalized(&self) -> Result<NormalizedPerformance> {
        Ok(NormalizedPerformance {
            distance_meters: self.event_name.distance_meters(),
            time_minutes: self.best_time_minutes()?,
        })
    }

    /// Full VDOT analysis of this personal best
    pub fn analyze(&self) -> Result<PerformanceAnalysis> {
        VdotEngine::analyze_normalized(&self.to_normalized()?)
    }

    /// The event echoed alongside its analysis
    pub fn report(&self) -> Result<SpecialtyReport> {
        Ok(SpecialtyReport {
            event: self.clone(),
            analysis: self.analyze()?,
        })
    }
}

/// A specialty event together with its VDOT analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyReport {
    #[serde(flatten)]
    pub event: SpecialtyEvent,

    #[serde(flatten)]
    pub analysis: PerformanceAnalysis,
}

/// One row of a user's personal-best listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalBest {
    pub id: Option<u64>,
    pub event_name: EventName,
    pub best_time: String,
    pub recorded_at: NaiveDate,
    /// None when the stored best time cannot be parsed
    #[serde(rename = "VDOT")]
    pub vdot: Option<i64>,
}

/// Load specialty events from a JSON array file
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<SpecialtyEvent>> {
    let content = fs::read_to_string(&path)?;
    let events: Vec<SpecialtyEvent> = serde_json::from_str(&content).map_err(|e| {
        VdotError::Configuration(format!(
            "failed to parse events file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    info!(path = %path.as_ref().display(), count = events.len(), "loaded specialty events");
    Ok(events)
}

/// A user's personal bests in stored order, each with its VDOT
pub fn personal_bests(events: &[SpecialtyEvent], user_id: u64) -> Vec<PersonalBest> {
    events
        .iter()
        .filter(|event| event.user_id == user_id)
        .map(|event| {
            let vdot = match event.analyze() {
                Ok(analysis) => Some(analysis.vdot),
                Err(err) => {
                    warn!(id = ?event.id, event = %event.event_name, %err, "personal best skipped");
                    None
                }
            };

            PersonalBest {
                id: event.id,
                event_name: event.event_name,
                best_time: event.best_time.clone(),
                recorded_at: event.recorded_at,
                vdot,
            }
        })
        .collect()
}

fn invalid_best_time(best_time: &str) -> VdotError {
    VdotError::InvalidDuration(format!(
        "best time must be h:mm:ss or m'ss\"SS, got '{}'",
        best_time
    ))
}

/// `h:mm:ss` or `hh:mm:ss`, e.g. `2:22:25`
static CLOCK_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2}):([0-9]{2})$").ok());

/// `m'ss"` with optional tenths or hundredths, e.g. `4'12"11`
static TRACK_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^([0-9]{1,2})'([0-9]{2})"([0-9]{1,2})?$"#).ok());

fn capture_number(captures: &Captures<'_>, index: usize) -> f64 {
    captures
        .get(index)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map_or(0.0, f64::from)
}

/// Convert a personal-best time into minutes.
///
/// Accepted forms:
/// - `h:mm:ss` / `hh:mm:ss` (e.g. `2:22:25`)
/// - `m'ss"` with optional one or two digit hundredths (e.g. `4'12"11`)
pub fn parse_best_time(best_time: &str) -> Result<f64> {
    if let Some(captures) = CLOCK_PATTERN.as_ref().and_then(|re| re.captures(best_time)) {
        let hours = capture_number(&captures, 1);
        let minutes = capture_number(&captures, 2);
        let seconds = capture_number(&captures, 3);
        return Ok(hours * 60.0 + minutes + seconds / 60.0);
    }

    if let Some(captures) = TRACK_PATTERN.as_ref().and_then(|re| re.captures(best_time)) {
        let minutes = capture_number(&captures, 1);
        let seconds = capture_number(&captures, 2);
        // "4'12"5" is five tenths, not five hundredths
        let fraction = captures.get(3).map_or(0.0, |m| {
            capture_number(&captures, 3) / 10f64.powi(m.as_str().len() as i32)
        });
        return Ok(minutes + (seconds + fraction) / 60.0);
    }

    Err(invalid_best_time(best_time))
}
