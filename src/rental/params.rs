//! Rental contract parameters

use crate::calendar::YearMonth;
use crate::error::{ConfigError, Result};
use crate::mortgage::MAX_PERIODS;
use crate::timeline::InflationMode;
use serde::{Deserialize, Serialize};

/// Inputs for one rental simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalParameters {
    /// Rent for the first simulated month
    pub base_rent: f64,
    /// Building expenses for the first simulated month
    pub base_expenses: f64,

    /// Months between rent revaluations
    pub adjustment_cadence_months: u32,
    pub duration_months: u32,

    /// Expenses follow inflation every month
    pub expenses_track_inflation: bool,

    /// For contracts already running: months since the rent was last revalued
    pub months_elapsed_since_last_adjustment: u32,

    /// Calendar month of the first simulated payment
    pub start_period: YearMonth,

    pub inflation_mode: InflationMode,
}

impl Default for RentalParameters {
    fn default() -> Self {
        Self {
            base_rent: 0.0,
            base_expenses: 0.0,
            adjustment_cadence_months: 0,
            duration_months: 0,
            expenses_track_inflation: true,
            months_elapsed_since_last_adjustment: 0,
            start_period: YearMonth::current(),
            inflation_mode: InflationMode::Timeline,
        }
    }
}

impl RentalParameters {
    /// Nothing to simulate yet: no duration, or neither rent nor expenses
    pub fn is_degenerate(&self) -> bool {
        self.duration_months == 0 || (self.base_rent <= 0.0 && self.base_expenses <= 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("base rent", self.base_rent), ("base expenses", self.base_expenses)] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        if !self.start_period.is_valid() {
            return Err(ConfigError::InvalidStartPeriod {
                month: self.start_period.month,
                year: self.start_period.year,
            });
        }
        if self.adjustment_cadence_months == 0 {
            return Err(ConfigError::InvalidCadence(self.adjustment_cadence_months));
        }
        // Also bounds the elapsed months, which must stay below the cadence
        if self.adjustment_cadence_months > MAX_PERIODS {
            return Err(ConfigError::TooManyPeriods {
                requested: self.adjustment_cadence_months,
                max: MAX_PERIODS,
            });
        }
        if self.months_elapsed_since_last_adjustment >= self.adjustment_cadence_months {
            return Err(ConfigError::ElapsedExceedsCadence {
                elapsed: self.months_elapsed_since_last_adjustment,
                cadence: self.adjustment_cadence_months,
            });
        }
        if self.duration_months > MAX_PERIODS {
            return Err(ConfigError::TooManyPeriods {
                requested: self.duration_months,
                max: MAX_PERIODS,
            });
        }
        if self.base_rent < 0.0 {
            return Err(ConfigError::NegativeAmount { name: "base rent", value: self.base_rent });
        }
        if self.base_expenses < 0.0 {
            return Err(ConfigError::NegativeAmount { name: "base expenses", value: self.base_expenses });
        }
        self.inflation_mode.validate()
    }

    /// Whether the rent is revalued at `period_index` (1-based)
    pub fn is_adjustment_period(&self, period_index: u32) -> bool {
        let months_since = (period_index as u64 - 1) + self.months_elapsed_since_last_adjustment as u64;
        period_index > 1
            && self.adjustment_cadence_months > 0
            && months_since % self.adjustment_cadence_months as u64 == 0
    }
}
