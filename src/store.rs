//! Performance record storage
//!
//! The engine never touches storage itself. Callers hand it records fetched
//! through a [`PerformanceStore`]; a missing record surfaces as
//! [`VdotError::RecordNotFound`].

use crate::error::{Result, VdotError};
use crate::models::PerformanceRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info};

/// Persistence seam for performance records
pub trait PerformanceStore: Send + Sync {
    /// Store a new record, returning it with its assigned id
    fn create(&self, record: PerformanceRecord) -> Result<PerformanceRecord>;

    /// The user's performance record (their earliest stored one)
    fn get_for_user(&self, user_id: u64) -> Result<PerformanceRecord>;

    /// Replace a user's record by id
    fn update(&self, user_id: u64, record_id: u64, record: PerformanceRecord) -> Result<PerformanceRecord>;

    /// All of a user's records, oldest first
    fn list_for_user(&self, user_id: u64) -> Result<Vec<PerformanceRecord>>;
}

/// Thread-safe in-memory store keyed by record id
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<BTreeMap<u64, PerformanceRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from records; records without an id get the next free one
    pub fn from_records(records: Vec<PerformanceRecord>) -> Self {
        let mut map = BTreeMap::new();
        let mut next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;

        for mut record in records {
            let id = match record.id {
                Some(id) => id,
                None => {
                    let id = next_id;
                    next_id += 1;
                    id
                }
            };
            record.id = Some(id);
            map.insert(id, record);
        }

        InMemoryStore {
            records: RwLock::new(map),
        }
    }

    /// Load records from a JSON array file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let records: Vec<PerformanceRecord> = serde_json::from_str(&content).map_err(|e| {
            VdotError::Configuration(format!(
                "failed to parse records file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        info!(path = %path.as_ref().display(), count = records.len(), "loaded performance records");
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<u64, PerformanceRecord>> {
        self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<u64, PerformanceRecord>> {
        self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PerformanceStore for InMemoryStore {
    fn create(&self, mut record: PerformanceRecord) -> Result<PerformanceRecord> {
        let mut records = self.write();
        let id = records.keys().next_back().copied().unwrap_or(0) + 1;
        record.id = Some(id);
        records.insert(id, record.clone());

        debug!(id, user_id = record.user_id, "created performance record");
        Ok(record)
    }

    fn get_for_user(&self, user_id: u64) -> Result<PerformanceRecord> {
        self.read()
            .values()
            .find(|r| r.user_id == user_id)
            .cloned()
            .ok_or(VdotError::RecordNotFound {
                user_id,
                record_id: None,
            })
    }

    fn update(&self, user_id: u64, record_id: u64, mut record: PerformanceRecord) -> Result<PerformanceRecord> {
        let mut records = self.write();
        match records.get_mut(&record_id) {
            Some(existing) if existing.user_id == user_id => {
                record.id = Some(record_id);
                record.user_id = user_id;
                *existing = record.clone();
                debug!(record_id, user_id, "updated performance record");
                Ok(record)
            }
            _ => Err(VdotError::RecordNotFound {
                user_id,
                record_id: Some(record_id),
            }),
        }
    }

    fn list_for_user(&self, user_id: u64) -> Result<Vec<PerformanceRecord>> {
        Ok(self
            .read()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
