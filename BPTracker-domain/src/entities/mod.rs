// Domain entities and value objects
pub mod reading;
pub mod trends;
pub mod conversions;

// Re-export common types for easier imports
pub use reading::{Category, CreateReadingRequest, Reading, UpdateReadingRequest};
pub use trends::{
    CategorizedReading, ChartPoint, ParseTimeRangeError, Quantity, QuantityStats, QuantitySummary,
    TimeRange, TrendReport,
};
