use std::sync::{Arc, Mutex};
use std::collections::HashMap;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::reading::{Reading, UpdateReadingRequest};
use super::errors::RepositoryError;

/// In-memory storage for blood pressure readings
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    /// Storage for readings, keyed by id
    readings: Arc<Mutex<HashMap<Uuid, Reading>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            readings: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a reading
    pub async fn insert(&self, reading: &Reading) -> Result<Reading, RepositoryError> {
        let mut store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.insert(reading.id, reading.clone());
        Ok(reading.clone())
    }

    /// Get all readings
    pub async fn get_all(&self) -> Result<Vec<Reading>, RepositoryError> {
        let store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        let readings: Vec<Reading> = store.values().cloned().collect();
        Ok(readings)
    }

    /// Get the reading with the most recent measurement time
    pub async fn get_latest(&self) -> Result<Option<Reading>, RepositoryError> {
        let store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let latest = store
            .values()
            .max_by_key(|reading| reading.measured_at)
            .cloned();

        Ok(latest)
    }

    /// Get a reading by id
    pub async fn get_by_id(&self, id: &Uuid) -> Result<Option<Reading>, RepositoryError> {
        let store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        Ok(store.get(id).cloned())
    }

    /// Apply a partial update to a stored reading.
    /// Returns `None` when no reading with the given id exists.
    pub async fn update(
        &self,
        id: &Uuid,
        changes: &UpdateReadingRequest,
    ) -> Result<Option<Reading>, RepositoryError> {
        let mut store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

        match store.get_mut(id) {
            Some(reading) => {
                if let Some(systolic) = changes.systolic {
                    reading.systolic = systolic;
                }
                if let Some(diastolic) = changes.diastolic {
                    reading.diastolic = diastolic;
                }
                if changes.pulse.is_some() {
                    reading.pulse = changes.pulse;
                }
                if let Some(notes) = &changes.notes {
                    reading.notes = Some(notes.clone());
                }
                if let Some(measured_at) = changes.measured_at {
                    reading.measured_at = measured_at;
                }

                Ok(Some(reading.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove a reading by id. Returns `true` when a reading was removed.
    pub async fn remove(&self, id: &Uuid) -> Result<bool, RepositoryError> {
        let mut store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        Ok(store.remove(id).is_some())
    }

    /// Get readings filtered by measurement time with pagination
    pub async fn get_filtered(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
        offset: Option<usize>,
        sort_desc: Option<bool>,
    ) -> Result<(Vec<Reading>, usize), RepositoryError> {
        let store = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        let sort_desc = sort_desc.unwrap_or(true);

        // First collect and filter all readings; both bounds are inclusive
        let mut readings: Vec<Reading> = store
            .values()
            .filter(|&reading| {
                if let Some(start) = start {
                    if reading.measured_at < start {
                        return false;
                    }
                }

                if let Some(end) = end {
                    if reading.measured_at > end {
                        return false;
                    }
                }

                true
            })
            .cloned()
            .collect();

        // Sort by measurement time
        readings.sort_by(|a, b| {
            let cmp = a.measured_at.cmp(&b.measured_at);
            if sort_desc {
                cmp.reverse()
            } else {
                cmp
            }
        });

        // Apply pagination
        let total = readings.len();
        let offset = offset.unwrap_or(0);
        let limit = limit.unwrap_or(total);

        let page = readings
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();

        Ok((page, total))
    }
}
