// BPTracker Domain
// This crate contains the business logic for blood pressure tracking

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Re-export the repository module from bp-tracker-data for convenience
pub use bp_tracker_data::repository;
