//! Inflation-adjusted rental contracts with stepped revaluation

mod params;
mod engine;

pub use params::RentalParameters;
pub use engine::{RentalAdjustmentEngine, RentalPeriods, RentalState};
