//! Scenario runner for batch simulations
//!
//! Builds the inflation timeline once, then runs many loan or rental
//! simulations against it without re-reading the data files.

use crate::analytics::Schedule;
use crate::error::{Result, SetupError};
use crate::mortgage::{AmortizationEngine, LoanParameters};
use crate::rental::{RentalAdjustmentEngine, RentalParameters};
use crate::timeline::{loader, FallbackMode, InflationTimeline};
use rayon::prelude::*;
use std::path::Path;

/// Pre-built scenario runner sharing one read-only timeline
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv(FallbackMode::Auto, None)?;
///
/// // Compare several rates against the same forecast
/// let loans: Vec<_> = [0.045, 0.06, 0.08]
///     .iter()
///     .map(|&rate| LoanParameters { annual_nominal_rate: rate, ..base.clone() })
///     .collect();
/// let schedules = runner.run_loans(&loans, true);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    timeline: InflationTimeline,
}

impl ScenarioRunner {
    /// Create runner with a pre-built timeline
    pub fn with_timeline(timeline: InflationTimeline) -> Self {
        Self { timeline }
    }

    /// Create runner by loading inflation tables from the default data directory
    pub fn from_csv(mode: FallbackMode, fallback_value: Option<f64>) -> std::result::Result<Self, SetupError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_DATA_PATH), mode, fallback_value)
    }

    /// Create runner from a specific data directory
    pub fn from_csv_path(
        path: &Path,
        mode: FallbackMode,
        fallback_value: Option<f64>,
    ) -> std::result::Result<Self, SetupError> {
        let records = loader::load_from(path)?;
        let timeline = InflationTimeline::build(records, mode, fallback_value)?;
        Ok(Self { timeline })
    }

    /// Run a single loan simulation
    pub fn run_loan(&self, loan: &LoanParameters, inflation_applied: bool) -> Result<Schedule> {
        AmortizationEngine::new(&self.timeline).generate(loan, inflation_applied)
    }

    /// Run several loans in parallel; results keep the input order
    pub fn run_loans(&self, loans: &[LoanParameters], inflation_applied: bool) -> Vec<Result<Schedule>> {
        let engine = AmortizationEngine::new(&self.timeline);
        loans
            .par_iter()
            .map(|loan| engine.generate(loan, inflation_applied))
            .collect()
    }

    /// Run a single rental simulation
    pub fn run_rental(&self, rental: &RentalParameters) -> Result<Schedule> {
        RentalAdjustmentEngine::new(&self.timeline).generate(rental)
    }

    /// Run several rental contracts in parallel; results keep the input order
    pub fn run_rentals(&self, rentals: &[RentalParameters]) -> Vec<Result<Schedule>> {
        let engine = RentalAdjustmentEngine::new(&self.timeline);
        rentals.par_iter().map(|rental| engine.generate(rental)).collect()
    }

    /// Get reference to the shared timeline
    pub fn timeline(&self) -> &InflationTimeline {
        &self.timeline
    }
}
