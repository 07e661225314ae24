//! Inflation timeline: realized index history merged with survey forecasts,
//! plus the fallback rate for months neither covers

mod record;
mod table;
pub mod loader;
pub mod survey;

pub use record::{InflationRecord, InflationSource, RateOrigin, RateSample};
pub use table::{manual_monthly_rate, FallbackMode, InflationMode, InflationTimeline};
