//! Daily workout log and monthly mileage
//!
//! Workouts are free-form training entries (`E3.2km, 6x(I800m), E3.2km`) with a
//! total mileage in km or miles, summarized per calendar month.

use crate::units::METERS_PER_MILE;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Unit a workout's mileage was logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MileageUnit {
    Km,
    Mile,
}

impl MileageUnit {
    pub fn to_kilometers(&self, mileage: f64) -> f64 {
        match self {
            MileageUnit::Km => mileage,
            MileageUnit::Mile => mileage * METERS_PER_MILE / 1000.0,
        }
    }
}

/// One logged training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub user_id: u64,

    pub date: NaiveDate,

    /// Start time, `HH:MM`
    pub start_time: String,

    /// Session description
    pub workout: String,

    /// Lap splits, e.g. `[3:30, 3:40, 3:50]`
    #[serde(default)]
    pub lap_time: Option<String>,

    pub mileage: f64,

    pub mileage_unit: MileageUnit,

    pub weather: String,
}

impl Workout {
    pub fn distance_km(&self) -> f64 {
        self.mileage_unit.to_kilometers(self.mileage)
    }
}

/// Workouts logged in the given calendar month, ordered by date then start time
pub fn workouts_in_month(workouts: &[Workout], year: i32, month: u32) -> Vec<&Workout> {
    let mut selected: Vec<&Workout> = workouts
        .iter()
        .filter(|w| w.date.year() == year && w.date.month() == month)
        .collect();
    selected.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
    selected
}

/// Monthly totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMileage {
    pub year: i32,
    pub month: u32,
    pub workout_count: usize,
    pub total_km: f64,
    /// Distinct days with at least one workout
    pub active_days: usize,
}

impl MonthlyMileage {
    pub fn from_workouts(workouts: &[Workout], year: i32, month: u32) -> Self {
        let selected = workouts_in_month(workouts, year, month);

        let mut days: Vec<NaiveDate> = selected.iter().map(|w| w.date).collect();
        days.dedup();

        MonthlyMileage {
            year,
            month,
            workout_count: selected.len(),
            total_km: selected.iter().map(|w| w.distance_km()).sum(),
            active_days: days.len(),
        }
    }
}
