use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use super::reading::{Category, Reading};

/// Lookback window used to filter readings for trend display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 7 days
    Week,

    /// Last 30 days
    Month,

    /// Last 365 days
    Year,
}

impl TimeRange {
    /// Number of days the window spans
    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Year => 365,
        }
    }

    /// Earliest measurement time still inside the window
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

/// Error returned when parsing an unrecognized time range
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid time range: {0}")]
pub struct ParseTimeRangeError(String);

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            _ => Err(ParseTimeRangeError(s.to_string())),
        }
    }
}

/// Measured quantity a summary is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Systolic,
    Diastolic,
    Pulse,
}

impl Quantity {
    /// Unit the quantity is measured in
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Systolic | Quantity::Diastolic => "mmHg",
            Quantity::Pulse => "bpm",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Systolic => "Systolic",
            Quantity::Diastolic => "Diastolic",
            Quantity::Pulse => "Pulse",
        };

        write!(f, "{}", name)
    }
}

/// One display-ready data point for a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Short display label for the measurement time, e.g. "Jan 05"
    pub label: String,

    /// Systolic blood pressure
    pub systolic: u16,

    /// Diastolic blood pressure
    pub diastolic: u16,

    /// Pulse rate, 0 when the reading carried none
    pub pulse: u16,

    /// Measurement time the point was derived from
    pub measured_at: DateTime<Utc>,
}

impl ChartPoint {
    /// Build a chart point from a reading
    pub fn from_reading(reading: &Reading) -> Self {
        Self {
            label: reading.measured_at.format("%b %d").to_string(),
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            pulse: reading.pulse.unwrap_or(0),
            measured_at: reading.measured_at,
        }
    }
}

/// Statistics over the readings that carry a value for one quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityStats {
    /// Number of readings with a value
    pub count: usize,

    /// Average value, rounded half-up to the nearest integer
    pub average: u16,

    /// Lowest recorded value
    pub min: u16,

    /// Highest recorded value
    pub max: u16,
}

/// Summary statistics for one quantity over a filtered reading set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySummary {
    /// Quantity the summary describes
    pub quantity: Quantity,

    /// Computed statistics, `None` when no reading in range carried a value
    pub stats: Option<QuantityStats>,
}

/// Trend output for one time range: the chart series plus per-quantity summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Chronologically ascending, range-filtered chart points
    pub series: Vec<ChartPoint>,

    /// One summary each for systolic, diastolic and pulse
    pub summaries: Vec<QuantitySummary>,
}

/// A reading paired with its derived severity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedReading {
    /// The underlying reading
    pub reading: Reading,

    /// Severity category derived from systolic and diastolic
    pub category: Category,
}
