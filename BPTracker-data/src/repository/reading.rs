use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;
use async_trait::async_trait;

use crate::models::reading::{CreateReadingRequest, Reading, UpdateReadingRequest};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStore;

/// Repository trait for blood pressure readings
#[async_trait]
pub trait ReadingRepositoryTrait {
    /// Create a new reading from a request
    async fn create(&self, request: CreateReadingRequest) -> Result<Reading, RepositoryError>;

    /// Get all readings
    async fn get_all(&self) -> Result<Vec<Reading>, RepositoryError>;

    /// Get the latest reading
    async fn get_latest(&self) -> Result<Option<Reading>, RepositoryError>;

    /// Get a reading by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Reading>, RepositoryError>;

    /// Apply a partial update to a reading
    async fn update(&self, id: Uuid, changes: UpdateReadingRequest) -> Result<Reading, RepositoryError>;

    /// Delete a reading
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Get filtered readings with pagination
    async fn get_filtered(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
        offset: Option<usize>,
        sort_desc: Option<bool>,
    ) -> Result<(Vec<Reading>, usize), RepositoryError>;
}

/// Repository for blood pressure readings backed by in-memory storage
#[derive(Debug, Clone, Default)]
pub struct ReadingRepository {
    /// In-memory storage
    storage: InMemoryStore,
}

impl ReadingRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStore::new(),
        }
    }
}

#[async_trait]
impl ReadingRepositoryTrait for ReadingRepository {
    /// Create a new reading from a request
    async fn create(&self, request: CreateReadingRequest) -> Result<Reading, RepositoryError> {
        let reading = Reading {
            id: Uuid::new_v4(),
            systolic: request.systolic,
            diastolic: request.diastolic,
            pulse: request.pulse,
            notes: request.notes,
            measured_at: request.measured_at,
            created_at: Utc::now(),
        };

        debug!("Storing blood pressure reading: {}", reading.id);
        self.storage.insert(&reading).await
    }

    /// Get all readings
    async fn get_all(&self) -> Result<Vec<Reading>, RepositoryError> {
        self.storage.get_all().await
    }

    /// Get the latest reading
    async fn get_latest(&self) -> Result<Option<Reading>, RepositoryError> {
        self.storage.get_latest().await
    }

    /// Get a reading by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Reading>, RepositoryError> {
        self.storage.get_by_id(&id).await
    }

    /// Apply a partial update to a reading
    async fn update(&self, id: Uuid, changes: UpdateReadingRequest) -> Result<Reading, RepositoryError> {
        debug!("Updating blood pressure reading: {}", id);

        match self.storage.update(&id, &changes).await? {
            Some(reading) => Ok(reading),
            None => Err(RepositoryError::NotFound(format!(
                "Reading with ID {} not found",
                id
            ))),
        }
    }

    /// Delete a reading
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        debug!("Deleting blood pressure reading: {}", id);

        if self.storage.remove(&id).await? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!(
                "Reading with ID {} not found",
                id
            )))
        }
    }

    /// Get filtered readings with pagination
    async fn get_filtered(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
        offset: Option<usize>,
        sort_desc: Option<bool>,
    ) -> Result<(Vec<Reading>, usize), RepositoryError> {
        self.storage.get_filtered(start, end, limit, offset, sort_desc).await
    }
}

/// Mock reading repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Mock implementation of ReadingRepository for testing.
    /// Holds its readings behind a mutex so mutations persist across calls,
    /// the same way the real store behaves.
    pub struct MockReadingRepository {
        readings: Mutex<Vec<Reading>>,
    }

    impl Default for MockReadingRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockReadingRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                readings: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock repository with predefined readings
        pub fn with_readings(readings: Vec<Reading>) -> Self {
            Self {
                readings: Mutex::new(readings),
            }
        }
    }

    #[async_trait]
    impl ReadingRepositoryTrait for MockReadingRepository {
        async fn create(&self, request: CreateReadingRequest) -> Result<Reading, RepositoryError> {
            let reading = Reading {
                id: Uuid::new_v4(),
                systolic: request.systolic,
                diastolic: request.diastolic,
                pulse: request.pulse,
                notes: request.notes,
                measured_at: request.measured_at,
                created_at: Utc::now(),
            };

            let mut readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
            readings.push(reading.clone());

            Ok(reading)
        }

        async fn get_all(&self) -> Result<Vec<Reading>, RepositoryError> {
            let readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
            Ok(readings.clone())
        }

        async fn get_latest(&self) -> Result<Option<Reading>, RepositoryError> {
            let readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

            let latest = readings.iter()
                .max_by(|a, b| a.measured_at.cmp(&b.measured_at))
                .cloned();

            Ok(latest)
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<Reading>, RepositoryError> {
            let readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

            let reading = readings.iter()
                .find(|r| r.id == id)
                .cloned();

            Ok(reading)
        }

        async fn update(&self, id: Uuid, changes: UpdateReadingRequest) -> Result<Reading, RepositoryError> {
            let mut readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

            let reading = readings.iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| RepositoryError::NotFound(format!("Reading with ID {} not found", id)))?;

            if let Some(systolic) = changes.systolic {
                reading.systolic = systolic;
            }
            if let Some(diastolic) = changes.diastolic {
                reading.diastolic = diastolic;
            }
            if changes.pulse.is_some() {
                reading.pulse = changes.pulse;
            }
            if let Some(notes) = changes.notes {
                reading.notes = Some(notes);
            }
            if let Some(measured_at) = changes.measured_at {
                reading.measured_at = measured_at;
            }

            Ok(reading.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            let mut readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

            match readings.iter().position(|r| r.id == id) {
                Some(index) => {
                    readings.remove(index);
                    Ok(())
                }
                None => Err(RepositoryError::NotFound(format!("Reading with ID {} not found", id))),
            }
        }

        async fn get_filtered(
            &self,
            start: Option<DateTime<Utc>>,
            end: Option<DateTime<Utc>>,
            limit: Option<usize>,
            offset: Option<usize>,
            sort_desc: Option<bool>,
        ) -> Result<(Vec<Reading>, usize), RepositoryError> {
            let readings = self.readings.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

            let offset = offset.unwrap_or(0);
            let limit = limit.unwrap_or(usize::MAX);
            let sort_desc = sort_desc.unwrap_or(true);

            let mut filtered: Vec<Reading> = readings.iter()
                .filter(|reading| {
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

            filtered.sort_by(|a, b| {
                let cmp = a.measured_at.cmp(&b.measured_at);
                if sort_desc {
                    cmp.reverse()
                } else {
                    cmp
                }
            });

            let total = filtered.len();

            let paged = filtered
                .into_iter()
                .skip(offset)
                .take(limit)
                .collect();

            Ok((paged, total))
        }
    }
}
