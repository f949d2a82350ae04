// Data storage models
pub mod reading;

// Re-export commonly used types
pub use reading::{CreateReadingRequest, Reading, UpdateReadingRequest};
