use crate::entities::reading::{CreateReadingRequest, Reading, UpdateReadingRequest};

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity for a reading
pub fn convert_to_domain_reading(data_reading: bp_tracker_data::models::reading::Reading) -> Reading {
    Reading {
        id: data_reading.id,
        systolic: data_reading.systolic,
        diastolic: data_reading.diastolic,
        pulse: data_reading.pulse,
        notes: data_reading.notes,
        measured_at: data_reading.measured_at,
        created_at: data_reading.created_at,
    }
}

/// Convert from domain entity to data model for a create request
pub fn convert_to_data_create_request(
    domain_request: &CreateReadingRequest,
) -> bp_tracker_data::models::reading::CreateReadingRequest {
    bp_tracker_data::models::reading::CreateReadingRequest {
        systolic: domain_request.systolic,
        diastolic: domain_request.diastolic,
        pulse: domain_request.pulse,
        notes: domain_request.notes.clone(),
        measured_at: domain_request.measured_at,
    }
}

/// Convert from domain entity to data model for an update request
pub fn convert_to_data_update_request(
    domain_request: &UpdateReadingRequest,
) -> bp_tracker_data::models::reading::UpdateReadingRequest {
    bp_tracker_data::models::reading::UpdateReadingRequest {
        systolic: domain_request.systolic,
        diastolic: domain_request.diastolic,
        pulse: domain_request.pulse,
        notes: domain_request.notes.clone(),
        measured_at: domain_request.measured_at,
    }
}
