//! Schedule analytics: per-period records, running variance, totals and the
//! summary ratios shown next to a schedule

mod record;
mod variance;
mod totals;
mod ratios;

pub use record::PeriodRecord;
pub use variance::{PeriodVariance, VarianceTracker};
pub use totals::{Schedule, ScheduleKind, ScheduleTotals};
pub use ratios::{
    affordability, gross_rental_yield, usd_equivalent, Affordability, RentalYield, YieldBand,
    AFFORDABILITY_LIMIT,
};
pub use crate::timeline::InflationSource;
