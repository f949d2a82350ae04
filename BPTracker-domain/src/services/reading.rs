use thiserror::Error;
use tracing::{debug, error, info};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::entities::conversions;
use crate::entities::reading::{Category, CreateReadingRequest, Reading, UpdateReadingRequest};
use crate::entities::trends::{CategorizedReading, TimeRange, TrendReport};
use crate::services::category::categorize;
use crate::services::trends;
use bp_tracker_data::repository::{ReadingRepository, ReadingRepositoryTrait, RepositoryError};

/// Page size applied when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on the page size a caller may ask for
pub const MAX_PAGE_SIZE: usize = 1000;

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(String),
}

/// Collect field validation errors into a single readable message
fn format_validation_errors(validation_errors: &ValidationErrors) -> String {
    validation_errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors
                .iter()
                .map(|err| {
                    if let Some(msg) = &err.message {
                        msg.to_string()
                    } else {
                        format!("Invalid {}", field)
                    }
                })
                .collect();
            format!("{}: {}", field, error_msgs.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}

/// Reading service for domain logic
pub struct ReadingService<R: ReadingRepositoryTrait> {
    repository: R,
}

impl<R: ReadingRepositoryTrait + Send + Sync> ReadingService<R> {
    /// Create a new reading service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> ReadingServiceError {
        match err {
            RepositoryError::NotFound(msg) => ReadingServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => ReadingServiceError::Validation(msg),
            _ => ReadingServiceError::Store(err.to_string()),
        }
    }

    /// Validate a create reading request
    pub fn validate_create_request(
        &self,
        request: &CreateReadingRequest,
    ) -> Result<(), ReadingServiceError> {
        if let Err(validation_errors) = request.validate() {
            return Err(ReadingServiceError::Validation(format_validation_errors(
                &validation_errors,
            )));
        }

        // Additional validation: systolic must exceed diastolic
        if request.systolic <= request.diastolic {
            return Err(ReadingServiceError::Validation(
                "Systolic pressure must be greater than diastolic pressure".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate an update reading request
    pub fn validate_update_request(
        &self,
        request: &UpdateReadingRequest,
    ) -> Result<(), ReadingServiceError> {
        if let Err(validation_errors) = request.validate() {
            return Err(ReadingServiceError::Validation(format_validation_errors(
                &validation_errors,
            )));
        }

        Ok(())
    }

    /// Create a new reading
    pub async fn create_reading(
        &self,
        request: CreateReadingRequest,
    ) -> Result<Reading, ReadingServiceError> {
        self.validate_create_request(&request)?;

        let data_request = conversions::convert_to_data_create_request(&request);

        let data_reading = self
            .repository
            .create(data_request)
            .await
            .map_err(|e| {
                error!("Failed to store blood pressure reading: {}", e);
                self.map_repo_error(e)
            })?;

        let reading = conversions::convert_to_domain_reading(data_reading);
        info!("Created blood pressure reading: {}", reading.id);

        Ok(reading)
    }

    /// Apply a partial update to an existing reading
    pub async fn update_reading(
        &self,
        id: Uuid,
        request: UpdateReadingRequest,
    ) -> Result<Reading, ReadingServiceError> {
        self.validate_update_request(&request)?;

        let existing = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                ReadingServiceError::NotFound(format!(
                    "Blood pressure reading with ID {} not found",
                    id
                ))
            })?;

        // Cross-field check against the values the update would leave in place
        let systolic = request.systolic.unwrap_or(existing.systolic);
        let diastolic = request.diastolic.unwrap_or(existing.diastolic);
        if systolic <= diastolic {
            return Err(ReadingServiceError::Validation(
                "Systolic pressure must be greater than diastolic pressure".to_string(),
            ));
        }

        let data_request = conversions::convert_to_data_update_request(&request);

        let data_reading = self
            .repository
            .update(id, data_request)
            .await
            .map_err(|e| {
                error!("Failed to update blood pressure reading {}: {}", id, e);
                self.map_repo_error(e)
            })?;

        Ok(conversions::convert_to_domain_reading(data_reading))
    }

    /// Delete a reading
    pub async fn delete_reading(&self, id: Uuid) -> Result<(), ReadingServiceError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| {
                error!("Failed to delete blood pressure reading {}: {}", id, e);
                self.map_repo_error(e)
            })?;

        info!("Deleted blood pressure reading: {}", id);
        Ok(())
    }

    /// Get a reading by ID
    pub async fn get_reading_by_id(&self, id: Uuid) -> Result<Reading, ReadingServiceError> {
        let data_reading = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                ReadingServiceError::NotFound(format!(
                    "Blood pressure reading with ID {} not found",
                    id
                ))
            })?;

        Ok(conversions::convert_to_domain_reading(data_reading))
    }

    /// Get all readings
    pub async fn get_all_readings(&self) -> Result<Vec<Reading>, ReadingServiceError> {
        let data_readings = self
            .repository
            .get_all()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        let readings = data_readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect();

        Ok(readings)
    }

    /// Get the most recently measured reading, if any
    pub async fn latest_reading(&self) -> Result<Option<Reading>, ReadingServiceError> {
        let data_reading = self
            .repository
            .get_latest()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_reading.map(conversions::convert_to_domain_reading))
    }

    /// Get filtered readings with pagination
    pub async fn get_filtered_readings(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
        offset: Option<usize>,
        sort_desc: Option<bool>,
    ) -> Result<(Vec<Reading>, usize), ReadingServiceError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

        let (data_readings, total_count) = self
            .repository
            .get_filtered(start, end, Some(limit), offset, sort_desc)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        let readings = data_readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect();

        Ok((readings, total_count))
    }

    /// Get every reading paired with its severity category, newest first
    pub async fn categorized_history(
        &self,
    ) -> Result<Vec<CategorizedReading>, ReadingServiceError> {
        let readings = self.get_all_readings().await?;
        Ok(trends::categorized_history(&readings))
    }

    /// Build the trend report for a lookback window ending at `now`
    pub async fn trend_report(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<TrendReport, ReadingServiceError> {
        debug!("Building trend report for the last {} days", range.days());

        let readings = self.get_all_readings().await?;
        Ok(trends::aggregate(&readings, range, now))
    }

    /// Get severity category for a reading
    pub fn get_severity(&self, reading: &Reading) -> Category {
        categorize(reading.systolic, reading.diastolic)
    }

    /// Check if a reading indicates a hypertensive crisis
    pub fn is_crisis(&self, reading: &Reading) -> bool {
        self.get_severity(reading) == Category::Crisis
    }
}

/// Create a default reading service backed by the data layer repository
pub fn create_default_reading_service() -> ReadingService<ReadingRepository> {
    ReadingService::new(ReadingRepository::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_tracker_data::repository::tests::MockReadingRepository;
    use chrono::Duration;

    fn data_reading(
        systolic: u16,
        diastolic: u16,
        pulse: Option<u16>,
        measured_at: DateTime<Utc>,
    ) -> bp_tracker_data::models::reading::Reading {
        bp_tracker_data::models::reading::Reading {
            id: Uuid::new_v4(),
            systolic,
            diastolic,
            pulse,
            notes: None,
            measured_at,
            created_at: measured_at,
        }
    }

    fn valid_request() -> CreateReadingRequest {
        CreateReadingRequest {
            systolic: 120,
            diastolic: 80,
            pulse: Some(72),
            notes: None,
            measured_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_create_request_valid() {
        let service = ReadingService::new(MockReadingRepository::new());
        assert!(service.validate_create_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_create_request_invalid_systolic() {
        let request = CreateReadingRequest {
            systolic: 300,
            ..valid_request()
        };

        let service = ReadingService::new(MockReadingRepository::new());
        let result = service.validate_create_request(&request);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Systolic"));
    }

    #[test]
    fn test_validate_create_request_invalid_diastolic() {
        let request = CreateReadingRequest {
            systolic: 180,
            diastolic: 160,
            ..valid_request()
        };

        let service = ReadingService::new(MockReadingRepository::new());
        let result = service.validate_create_request(&request);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Diastolic"));
    }

    #[test]
    fn test_validate_create_request_systolic_not_greater_than_diastolic() {
        let request = CreateReadingRequest {
            systolic: 80,
            diastolic: 80,
            ..valid_request()
        };

        let service = ReadingService::new(MockReadingRepository::new());
        let result = service.validate_create_request(&request);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("greater than"));
    }

    #[test]
    fn test_validate_update_request_rejects_out_of_range_pulse() {
        let request = UpdateReadingRequest {
            pulse: Some(10),
            ..Default::default()
        };

        let service = ReadingService::new(MockReadingRepository::new());
        assert!(service.validate_update_request(&request).is_err());
    }

    #[tokio::test]
    async fn test_create_reading() {
        let service = ReadingService::new(MockReadingRepository::new());
        let request = valid_request();

        let reading = service.create_reading(request.clone()).await.unwrap();
        assert_eq!(reading.systolic, request.systolic);
        assert_eq!(reading.diastolic, request.diastolic);
        assert_eq!(reading.pulse, request.pulse);
        assert_eq!(reading.measured_at, request.measured_at);
    }

    #[tokio::test]
    async fn test_create_reading_rejects_future_measurement_time() {
        let service = ReadingService::new(MockReadingRepository::new());
        let request = CreateReadingRequest {
            measured_at: Utc::now() + Duration::days(1),
            ..valid_request()
        };

        let result = service.create_reading(request).await;
        assert!(matches!(result, Err(ReadingServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_reading_by_id_not_found() {
        let service = ReadingService::new(MockReadingRepository::new());

        let result = service.get_reading_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ReadingServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_reading_not_found() {
        let service = ReadingService::new(MockReadingRepository::new());

        let result = service.delete_reading(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ReadingServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_reading_checks_effective_values() {
        let now = Utc::now();
        let existing = data_reading(120, 80, Some(70), now);
        let id = existing.id;
        let service = ReadingService::new(MockReadingRepository::with_readings(vec![existing]));

        // Raising only the diastolic above the stored systolic must fail
        let result = service
            .update_reading(
                id,
                UpdateReadingRequest {
                    diastolic: Some(125),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ReadingServiceError::Validation(_))));

        // Raising both together is fine
        let updated = service
            .update_reading(
                id,
                UpdateReadingRequest {
                    systolic: Some(150),
                    diastolic: Some(95),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.systolic, 150);
        assert_eq!(updated.diastolic, 95);
    }

    #[tokio::test]
    async fn test_get_filtered_readings_applies_default_limit() {
        let now = Utc::now();
        let readings: Vec<_> = (0..25)
            .map(|i| data_reading(120, 80, None, now - Duration::hours(i)))
            .collect();

        let service = ReadingService::new(MockReadingRepository::with_readings(readings));

        let (page, total) = service
            .get_filtered_readings(None, None, None, None, None)
            .await
            .unwrap();
        assert_eq!(total, 25);
        assert_eq!(page.len(), DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_get_filtered_readings_caps_requested_limit() {
        let now = Utc::now();
        let readings: Vec<_> = (0..MAX_PAGE_SIZE + 5)
            .map(|i| data_reading(120, 80, None, now - Duration::minutes(i as i64)))
            .collect();

        let service = ReadingService::new(MockReadingRepository::with_readings(readings));

        let (page, total) = service
            .get_filtered_readings(None, None, Some(5000), None, None)
            .await
            .unwrap();
        assert_eq!(total, MAX_PAGE_SIZE + 5);
        assert_eq!(page.len(), MAX_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_categorized_history() {
        let now = Utc::now();
        let readings = vec![
            data_reading(190, 95, None, now - Duration::days(2)),
            data_reading(118, 76, None, now - Duration::days(1)),
        ];

        let service = ReadingService::new(MockReadingRepository::with_readings(readings));

        let history = service.categorized_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].category, Category::Normal);
        assert_eq!(history[1].category, Category::Crisis);
    }

    #[tokio::test]
    async fn test_trend_report() {
        let now = Utc::now();
        let readings = vec![
            data_reading(120, 80, Some(70), now - Duration::days(1)),
            data_reading(130, 85, None, now - Duration::days(3)),
            data_reading(140, 90, Some(80), now - Duration::days(20)),
        ];

        let service = ReadingService::new(MockReadingRepository::with_readings(readings));

        let report = service.trend_report(TimeRange::Week, now).await.unwrap();
        assert_eq!(report.series.len(), 2);

        let pulse = report.summaries[2].stats.as_ref().unwrap();
        assert_eq!(pulse.count, 1);
        assert_eq!(pulse.average, 70);
    }

    #[test]
    fn test_get_severity_and_is_crisis() {
        let service = ReadingService::new(MockReadingRepository::new());
        let now = Utc::now();

        let stage2 = conversions::convert_to_domain_reading(data_reading(180, 120, None, now));
        assert_eq!(service.get_severity(&stage2), Category::Stage2);
        assert!(!service.is_crisis(&stage2));

        let crisis = conversions::convert_to_domain_reading(data_reading(181, 90, None, now));
        assert_eq!(service.get_severity(&crisis), Category::Crisis);
        assert!(service.is_crisis(&crisis));
    }
}
