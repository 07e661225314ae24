//! Inflation records and rate provenance

use crate::calendar::YearMonth;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a loaded inflation record comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateOrigin {
    /// Published index (IPC)
    Realized,
    /// Market expectations survey (REM)
    Forecast,
}

/// Provenance of the inflation rate applied to a simulated period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InflationSource {
    Realized,
    Forecast,
    /// Neither realized nor forecast data covers the month (inertia)
    Fallback,
    /// Flat rate derived from a user-supplied annual figure
    Manual,
}

impl From<RateOrigin> for InflationSource {
    fn from(origin: RateOrigin) -> Self {
        match origin {
            RateOrigin::Realized => InflationSource::Realized,
            RateOrigin::Forecast => InflationSource::Forecast,
        }
    }
}

impl fmt::Display for InflationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            InflationSource::Realized => "IPC",
            InflationSource::Forecast => "REM",
            InflationSource::Fallback => "INERCIA",
            InflationSource::Manual => "MANUAL",
        };
        f.pad(tag)
    }
}

/// One month of inflation data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationRecord {
    /// Calendar month (1-12)
    pub month: u32,
    pub year: i32,
    /// Monthly rate as a decimal fraction (0.025 = 2.5%)
    pub monthly_rate: f64,
    pub origin: RateOrigin,
}

impl InflationRecord {
    pub fn new(month: u32, year: i32, monthly_rate: f64, origin: RateOrigin) -> Self {
        Self { month, year, monthly_rate, origin }
    }

    pub fn realized(month: u32, year: i32, monthly_rate: f64) -> Self {
        Self::new(month, year, monthly_rate, RateOrigin::Realized)
    }

    pub fn forecast(month: u32, year: i32, monthly_rate: f64) -> Self {
        Self::new(month, year, monthly_rate, RateOrigin::Forecast)
    }

    pub fn period(&self) -> YearMonth {
        YearMonth { year: self.year, month: self.month }
    }
}

/// Rate applied to one period together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSample {
    pub rate: f64,
    pub source: InflationSource,
}

impl RateSample {
    /// Growth factor `1 + rate`
    pub fn factor(&self) -> f64 {
        1.0 + self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag_respects_width() {
        assert_eq!(format!("{:>8}", InflationSource::Forecast), "     REM");
        assert_eq!(format!("{:<8}|", InflationSource::Fallback), "INERCIA |");
        assert_eq!(InflationSource::Realized.to_string(), "IPC");
    }
}
