use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Domain model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier for the reading
    pub id: Uuid,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    pub pulse: Option<u16>,

    /// Optional notes about the reading
    pub notes: Option<String>,

    /// When the measurement was taken
    pub measured_at: DateTime<Utc>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReadingRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 70, max = 250, message = "Systolic must be between 70 and 250"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 40, max = 150, message = "Diastolic must be between 40 and 150"))]
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    #[validate(range(min = 40, max = 200, message = "Pulse must be between 40 and 200"))]
    pub pulse: Option<u16>,

    /// Optional notes about the reading
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    /// When the measurement was taken
    #[validate(custom = "validate_not_future")]
    pub measured_at: DateTime<Utc>,
}

/// Request payload for partially updating an existing reading.
/// Fields left as `None` keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReadingRequest {
    /// New systolic value, if changed
    #[validate(range(min = 70, max = 250, message = "Systolic must be between 70 and 250"))]
    pub systolic: Option<u16>,

    /// New diastolic value, if changed
    #[validate(range(min = 40, max = 150, message = "Diastolic must be between 40 and 150"))]
    pub diastolic: Option<u16>,

    /// New pulse value, if changed
    #[validate(range(min = 40, max = 200, message = "Pulse must be between 40 and 200"))]
    pub pulse: Option<u16>,

    /// New notes, if changed
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    /// New measurement time, if changed
    #[validate(custom = "validate_not_future")]
    pub measured_at: Option<DateTime<Utc>>,
}

/// Reject measurement times that lie in the future
fn validate_not_future(measured_at: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *measured_at > Utc::now() {
        let mut error = ValidationError::new("future_timestamp");
        error.message = Some("Measurement time cannot be in the future".into());
        return Err(error);
    }

    Ok(())
}

/// Blood pressure category based on measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    Stage1,

    /// Stage 2 Hypertension (systolic >= 140 or diastolic >= 90)
    Stage2,

    /// Hypertensive crisis (systolic > 180 or diastolic > 120)
    Crisis,

    /// Combination not covered by any clinical band
    Unknown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Normal => "Normal",
            Category::Elevated => "Elevated",
            Category::Stage1 => "Stage 1",
            Category::Stage2 => "Stage 2",
            Category::Crisis => "Crisis",
            Category::Unknown => "Unknown",
        };

        write!(f, "{}", label)
    }
}
