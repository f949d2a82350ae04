use chrono::{DateTime, Utc};

use crate::entities::reading::Reading;
use crate::entities::trends::{
    CategorizedReading, ChartPoint, Quantity, QuantityStats, QuantitySummary, TimeRange,
    TrendReport,
};
use crate::services::category::categorize;

/// Running statistics for one quantity
struct StatsAccumulator {
    count: u64,
    sum: u64,
    min: u16,
    max: u16,
}

impl StatsAccumulator {
    fn new() -> Self {
        Self {
            count: 0,
            sum: 0,
            min: u16::MAX,
            max: u16::MIN,
        }
    }

    fn record(&mut self, value: u16) {
        self.count += 1;
        self.sum += u64::from(value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn into_summary(self, quantity: Quantity) -> QuantitySummary {
        let stats = if self.count == 0 {
            None
        } else {
            // Integer round-half-up
            let average = ((self.sum + self.count / 2) / self.count) as u16;

            Some(QuantityStats {
                count: self.count as usize,
                average,
                min: self.min,
                max: self.max,
            })
        };

        QuantitySummary { quantity, stats }
    }
}

/// Build the trend report for one lookback window.
///
/// Readings are sorted ascending by measurement time (stable, so readings
/// with equal times keep their input order), filtered to those at or after
/// the window cutoff, and mapped to chart points. A reading without a pulse
/// shows as 0 in the series but is left out of the pulse statistics, so a
/// missing pulse never drags the average down. The caller passes `now`
/// explicitly, which makes the report a pure function of its inputs.
pub fn aggregate(readings: &[Reading], range: TimeRange, now: DateTime<Utc>) -> TrendReport {
    let cutoff = range.cutoff(now);

    let mut ordered: Vec<&Reading> = readings.iter().collect();
    ordered.sort_by_key(|reading| reading.measured_at);

    let mut series = Vec::new();
    let mut systolic = StatsAccumulator::new();
    let mut diastolic = StatsAccumulator::new();
    let mut pulse = StatsAccumulator::new();

    for reading in ordered {
        if reading.measured_at < cutoff {
            continue;
        }

        series.push(ChartPoint::from_reading(reading));
        systolic.record(reading.systolic);
        diastolic.record(reading.diastolic);

        if let Some(value) = reading.pulse {
            pulse.record(value);
        }
    }

    TrendReport {
        series,
        summaries: vec![
            systolic.into_summary(Quantity::Systolic),
            diastolic.into_summary(Quantity::Diastolic),
            pulse.into_summary(Quantity::Pulse),
        ],
    }
}

/// Pair every reading with its severity category, newest first.
/// Readings with equal measurement times keep their input order.
pub fn categorized_history(readings: &[Reading]) -> Vec<CategorizedReading> {
    let mut ordered: Vec<&Reading> = readings.iter().collect();
    ordered.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));

    ordered
        .into_iter()
        .map(|reading| CategorizedReading {
            category: categorize(reading.systolic, reading.diastolic),
            reading: reading.clone(),
        })
        .collect()
}
