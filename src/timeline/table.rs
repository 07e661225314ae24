//! Merged inflation lookup keyed by calendar month

use super::record::{InflationRecord, InflationSource, RateOrigin, RateSample};
use crate::calendar::YearMonth;
use crate::error::{ConfigError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the rate for months without data is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackMode {
    /// Repeat the rate of the latest record (inertia)
    Auto,
    /// Use a caller-supplied monthly rate
    Fixed,
}

/// Convert an annual inflation percentage into the equivalent monthly rate
pub fn manual_monthly_rate(annual_pct: f64) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Read-only inflation lookup for one simulation run.
///
/// Built once from realized and forecast records; lookups never fail because
/// months without data resolve to the fallback rate.
#[derive(Debug, Clone)]
pub struct InflationTimeline {
    records: HashMap<YearMonth, InflationRecord>,
    fallback_mode: FallbackMode,
    fallback_rate: f64,
}

impl InflationTimeline {
    /// Merge records into a timeline.
    ///
    /// Realized data supersedes forecasts for the same month. Two records of
    /// the same origin for one month keep the one listed last.
    pub fn build<I>(records: I, mode: FallbackMode, fallback_value: Option<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = InflationRecord>,
    {
        let mut merged: HashMap<YearMonth, InflationRecord> = HashMap::new();

        for record in records {
            if !(1..=12).contains(&record.month) {
                warn!("Skipping inflation record with month {} in {}", record.month, record.year);
                continue;
            }
            if !record.monthly_rate.is_finite() || record.monthly_rate <= -1.0 {
                return Err(ConfigError::InvalidInflationRate {
                    month: record.month,
                    year: record.year,
                    rate: record.monthly_rate,
                });
            }

            let key = record.period();
            let superseded = matches!(
                merged.get(&key),
                Some(existing) if existing.origin == RateOrigin::Realized
                    && record.origin == RateOrigin::Forecast
            );
            if !superseded {
                merged.insert(key, record);
            }
        }

        let fallback_rate = match mode {
            FallbackMode::Fixed => fallback_value.ok_or(ConfigError::MissingFallbackValue)?,
            FallbackMode::Auto => match merged.keys().max() {
                Some(last) => merged[last].monthly_rate,
                None => {
                    warn!("Automatic fallback requested without inflation data; using 0%");
                    0.0
                }
            },
        };
        if !fallback_rate.is_finite() || fallback_rate <= -1.0 {
            return Err(ConfigError::InvalidFallbackRate(fallback_rate));
        }

        debug!(
            "Inflation timeline built: {} months, {:?} fallback {:.4}%",
            merged.len(),
            mode,
            fallback_rate * 100.0
        );

        Ok(Self {
            records: merged,
            fallback_mode: mode,
            fallback_rate,
        })
    }

    /// Timeline without any data that always answers `rate`
    pub fn constant(rate: f64) -> Result<Self> {
        Self::build(Vec::new(), FallbackMode::Fixed, Some(rate))
    }

    /// Rate and provenance for a calendar month.
    ///
    /// Months outside 1-12 are normalized into the adjacent year.
    pub fn lookup(&self, month: u32, year: i32) -> RateSample {
        self.lookup_period(YearMonth::new(month, year))
    }

    pub fn lookup_period(&self, period: YearMonth) -> RateSample {
        match self.records.get(&period) {
            Some(record) => RateSample {
                rate: record.monthly_rate,
                source: record.origin.into(),
            },
            None => RateSample {
                rate: self.fallback_rate,
                source: InflationSource::Fallback,
            },
        }
    }

    pub fn fallback_rate(&self) -> f64 {
        self.fallback_rate
    }

    pub fn fallback_mode(&self) -> FallbackMode {
        self.fallback_mode
    }

    /// Merged records in chronological order
    pub fn records(&self) -> Vec<InflationRecord> {
        let mut records: Vec<_> = self.records.values().copied().collect();
        records.sort_by_key(|r| r.period());
        records
    }

    /// First and last month with data
    pub fn coverage(&self) -> Option<(YearMonth, YearMonth)> {
        let first = self.records.keys().min()?;
        let last = self.records.keys().max()?;
        Some((*first, *last))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Where each period's inflation rate comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum InflationMode {
    /// Look the month up in the timeline
    #[default]
    Timeline,
    /// Flat monthly rate derived from an annual percentage
    Manual { annual_pct: f64 },
}

impl InflationMode {
    pub fn validate(&self) -> Result<()> {
        match *self {
            InflationMode::Manual { annual_pct } if !annual_pct.is_finite() || annual_pct <= -100.0 => {
                Err(ConfigError::InvalidFallbackRate(annual_pct / 100.0))
            }
            _ => Ok(()),
        }
    }

    /// Rate applied to `period`
    pub fn sample(&self, timeline: &InflationTimeline, period: YearMonth) -> RateSample {
        match *self {
            InflationMode::Timeline => timeline.lookup_period(period),
            InflationMode::Manual { annual_pct } => RateSample {
                rate: manual_monthly_rate(annual_pct),
                source: InflationSource::Manual,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_records() -> Vec<InflationRecord> {
        vec![
            InflationRecord::forecast(1, 2025, 0.022),
            InflationRecord::realized(1, 2025, 0.019),
            InflationRecord::forecast(2, 2025, 0.021),
            InflationRecord::forecast(3, 2025, 0.020),
        ]
    }

    #[test]
    fn test_realized_supersedes_forecast() {
        let timeline = InflationTimeline::build(sample_records(), FallbackMode::Auto, None).unwrap();
        let sample = timeline.lookup(1, 2025);
        assert_relative_eq!(sample.rate, 0.019);
        assert_eq!(sample.source, InflationSource::Realized);

        // Order of arrival does not matter
        let mut reversed = sample_records();
        reversed.reverse();
        let timeline = InflationTimeline::build(reversed, FallbackMode::Auto, None).unwrap();
        assert_eq!(timeline.lookup(1, 2025).source, InflationSource::Realized);
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn test_auto_fallback_uses_latest_record() {
        let timeline = InflationTimeline::build(sample_records(), FallbackMode::Auto, None).unwrap();
        assert_relative_eq!(timeline.fallback_rate(), 0.020);

        let sample = timeline.lookup(4, 2025);
        assert_eq!(sample.source, InflationSource::Fallback);
        assert_relative_eq!(sample.rate, 0.020);
    }

    #[test]
    fn test_fixed_fallback_requires_value() {
        let err = InflationTimeline::build(sample_records(), FallbackMode::Fixed, None).unwrap_err();
        assert_eq!(err, ConfigError::MissingFallbackValue);

        let timeline = InflationTimeline::build(sample_records(), FallbackMode::Fixed, Some(0.01)).unwrap();
        assert_relative_eq!(timeline.lookup(6, 2031).rate, 0.01);
    }

    #[test]
    fn test_lookup_is_total() {
        let timeline = InflationTimeline::build(Vec::new(), FallbackMode::Auto, None).unwrap();
        for (month, year) in [(1, 1900), (12, 2999), (0, 2025), (25, -40)] {
            let sample = timeline.lookup(month, year);
            assert!(sample.rate.is_finite());
            assert_eq!(sample.source, InflationSource::Fallback);
        }
    }

    #[test]
    fn test_rejects_rate_at_minus_one() {
        let records = vec![InflationRecord::forecast(5, 2025, -1.0)];
        let err = InflationTimeline::build(records, FallbackMode::Auto, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInflationRate { month: 5, year: 2025, .. }));
    }

    #[test]
    fn test_coverage_and_ordering() {
        let timeline = InflationTimeline::build(sample_records(), FallbackMode::Auto, None).unwrap();
        let (first, last) = timeline.coverage().unwrap();
        assert_eq!(first, YearMonth::new(1, 2025));
        assert_eq!(last, YearMonth::new(3, 2025));
        let months: Vec<u32> = timeline.records().iter().map(|r| r.month).collect();
        assert_eq!(months, vec![1, 2, 3]);
    }

    #[test]
    fn test_manual_mode() {
        let timeline = InflationTimeline::constant(0.05).unwrap();
        let mode = InflationMode::Manual { annual_pct: 26.824179456254 };
        let sample = mode.sample(&timeline, YearMonth::new(1, 2025));
        assert_eq!(sample.source, InflationSource::Manual);
        assert_relative_eq!(sample.rate, 0.02, epsilon = 1e-9);
        assert!(InflationMode::Manual { annual_pct: -100.0 }.validate().is_err());
    }
}
