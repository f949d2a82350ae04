use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage model for a blood pressure reading
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

    /// When the record was created in the store
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new reading; the store assigns
/// the id and the creation timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReadingRequest {
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
}

/// Partial update for an existing reading; fields left as `None`
/// keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReadingRequest {
    /// Systolic blood pressure (the higher number)
    pub systolic: Option<u16>,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: Option<u16>,

    /// Pulse rate in beats per minute
    pub pulse: Option<u16>,

    /// Notes about the reading
    pub notes: Option<String>,

    /// When the measurement was taken
    pub measured_at: Option<DateTime<Utc>>,
}
