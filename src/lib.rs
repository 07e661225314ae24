//! ProyectAR - Payment projections for UVA-indexed mortgages and inflation-adjusted rentals
//!
//! This library provides:
//! - A merged inflation timeline (realized index, survey forecasts, inertia fallback)
//! - French and German amortization in index units with monthly revaluation
//! - Stepped rent adjustment with optional monthly expense indexation
//! - Inline variance analytics, totals and summary ratios
//! - Batch simulation against a shared timeline

pub mod calendar;
pub mod error;
pub mod timeline;
pub mod analytics;
pub mod mortgage;
pub mod rental;
pub mod market;
pub mod scenario;

// Re-export commonly used types
pub use calendar::YearMonth;
pub use error::{ConfigError, DataError};
pub use timeline::{FallbackMode, InflationRecord, InflationSource, InflationTimeline};
pub use analytics::{PeriodRecord, Schedule, ScheduleTotals};
pub use mortgage::{AmortizationEngine, AmortizationMethod, LoanParameters};
pub use rental::{RentalAdjustmentEngine, RentalParameters};
pub use market::MarketSnapshot;
pub use scenario::ScenarioRunner;
