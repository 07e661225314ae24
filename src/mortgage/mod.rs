//! UVA-indexed loan amortization

mod params;
mod state;
mod engine;

pub use params::{AmortizationMethod, LoanParameters, PrincipalUnit, MAX_PERIODS};
pub use state::LoanState;
pub use engine::{AmortizationEngine, LoanPeriods};
