//! Use-case layer for performance records
//!
//! Glues a [`PerformanceStore`] to the [`VdotEngine`]. Store errors
//! (including `RecordNotFound`) pass through unchanged.

use crate::engine::{VdotEngine, VdotReport};
use crate::error::{Result, VdotError};
use crate::models::PerformanceRecord;
use crate::store::PerformanceStore;
use crate::units;
use tracing::instrument;

pub struct VdotService<S: PerformanceStore> {
    store: S,
}

impl<S: PerformanceStore> VdotService<S> {
    pub fn new(store: S) -> Self {
        VdotService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a new record once its distance and time parse
    #[instrument(skip(self, record), err(level = "warn"))]
    pub fn create_record(&self, user_id: u64, mut record: PerformanceRecord) -> Result<PerformanceRecord> {
        validate(&record)?;
        record.user_id = user_id;
        self.store.create(record)
    }

    #[instrument(skip(self), err(level = "warn"))]
    pub fn get_record(&self, user_id: u64) -> Result<PerformanceRecord> {
        self.store.get_for_user(user_id)
    }

    #[instrument(skip(self, record), err(level = "warn"))]
    pub fn update_record(&self, user_id: u64, record_id: u64, record: PerformanceRecord) -> Result<PerformanceRecord> {
        validate(&record)?;
        self.store.update(user_id, record_id, record)
    }

    /// VDOT, pace zones and race predictions for the user's stored performance
    #[instrument(skip(self), err(level = "warn"))]
    pub fn user_vdot_value(&self, user_id: u64) -> Result<VdotReport> {
        let record = self.store.get_for_user(user_id)?;
        VdotEngine::analyze(&record)
    }
}

fn validate(record: &PerformanceRecord) -> Result<()> {
    let normalized = units::normalize_record(record)?;
    if normalized.distance_meters <= 0.0 {
        return Err(VdotError::InvalidDistance(format!(
            "distance must be greater than zero, got {}",
            record.distance_value
        )));
    }
    Ok(())
}
