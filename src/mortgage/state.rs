//! Running state of a loan during amortization

use super::params::{AmortizationMethod, LoanParameters};
use crate::calendar::YearMonth;

/// Balance and index position between two installments
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Installments already paid
    pub period_index: u32,

    /// Calendar month of the next installment
    pub period: YearMonth,

    /// Original balance in index units
    pub original_units: f64,

    /// Outstanding balance in index units
    pub balance_units: f64,

    /// Current currency value of one index unit
    pub index_value: f64,

    /// Principal per installment under the German system
    pub constant_principal_units: f64,

    /// Whether the halfway milestone has been flagged
    pub halfway_reached: bool,
}

impl LoanState {
    /// Initialize state at the first installment
    pub fn from_loan(loan: &LoanParameters) -> Self {
        let original_units = loan.principal_index_units();
        let constant_principal_units = match loan.amortization_method {
            AmortizationMethod::German => original_units / loan.term_months as f64,
            AmortizationMethod::French => 0.0,
        };

        Self {
            period_index: 0,
            period: loan.start_period,
            original_units,
            balance_units: original_units,
            index_value: loan.index_unit_value,
            constant_principal_units,
            halfway_reached: false,
        }
    }

    /// Installments left including the next one
    pub fn remaining_periods(&self, term_months: u32) -> u32 {
        term_months.saturating_sub(self.period_index)
    }

    pub fn is_repaid(&self) -> bool {
        self.balance_units <= 0.0
    }

    /// Move to the next month after the index has been revalued by `rate`
    pub fn advance_month(&mut self, rate: f64) {
        self.index_value *= 1.0 + rate;
        self.period = self.period.next();
        self.period_index += 1;
    }
}
