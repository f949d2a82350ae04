pub mod category;
pub mod trends;
pub mod reading;

// Domain services
// This module contains business logic implementations.

// Re-export service entry points and factory functions
pub use category::categorize;
pub use trends::{aggregate, categorized_history};
pub use reading::{create_default_reading_service, ReadingService, ReadingServiceError};
