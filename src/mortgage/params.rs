//! Loan parameters

use crate::calendar::YearMonth;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Longest supported schedule (50 years of monthly payments)
pub const MAX_PERIODS: u32 = 600;

/// Amortization system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationMethod {
    /// Constant installment in index units
    #[default]
    French,
    /// Constant principal repayment
    German,
}

/// Unit in which the principal is stated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalUnit {
    /// Currency amount converted at the current index unit value
    #[default]
    Currency,
    /// Outstanding balance already expressed in index units (ongoing loans)
    IndexUnits,
}

/// Inputs for one loan simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed, or outstanding balance for ongoing loans
    pub principal: f64,
    pub principal_unit: PrincipalUnit,

    /// Number of installments (remaining installments for ongoing loans)
    pub term_months: u32,

    /// Nominal annual rate as a decimal (0.08 = 8%)
    pub annual_nominal_rate: f64,
    pub amortization_method: AmortizationMethod,

    /// Calendar month of the first installment
    pub start_period: YearMonth,

    /// Currency value of one index unit at the start
    pub index_unit_value: f64,

    /// Monthly charge as a fraction of the original principal
    pub extra_monthly_charge_rate: f64,

    /// Annual inflation (percent) used when the timeline is not applied
    pub manual_annual_inflation_pct: f64,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: 0.0,
            principal_unit: PrincipalUnit::Currency,
            term_months: 0,
            annual_nominal_rate: 0.0,
            amortization_method: AmortizationMethod::French,
            start_period: YearMonth::current(),
            index_unit_value: 1.0,
            extra_monthly_charge_rate: 0.0,
            manual_annual_inflation_pct: 0.0,
        }
    }
}

impl LoanParameters {
    /// Nothing to simulate yet: no principal or no term
    pub fn is_degenerate(&self) -> bool {
        self.principal <= 0.0 || self.term_months == 0
    }

    /// Check the parameter combination before generating
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("principal", self.principal),
            ("annual nominal rate", self.annual_nominal_rate),
            ("extra monthly charge rate", self.extra_monthly_charge_rate),
        ] {
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
        if self.term_months > MAX_PERIODS {
            return Err(ConfigError::TooManyPeriods {
                requested: self.term_months,
                max: MAX_PERIODS,
            });
        }
        if !(self.index_unit_value > 0.0 && self.index_unit_value.is_finite()) {
            return Err(ConfigError::InvalidIndexValue(self.index_unit_value));
        }
        if self.annual_nominal_rate < 0.0 {
            return Err(ConfigError::NegativeRate {
                name: "annual nominal rate",
                value: self.annual_nominal_rate,
            });
        }
        if self.extra_monthly_charge_rate < 0.0 {
            return Err(ConfigError::NegativeRate {
                name: "extra monthly charge rate",
                value: self.extra_monthly_charge_rate,
            });
        }
        Ok(())
    }

    pub fn monthly_nominal_rate(&self) -> f64 {
        self.annual_nominal_rate / 12.0
    }

    /// Original balance in index units
    pub fn principal_index_units(&self) -> f64 {
        match self.principal_unit {
            PrincipalUnit::Currency => self.principal / self.index_unit_value,
            PrincipalUnit::IndexUnits => self.principal,
        }
    }

    /// Original balance in currency at the starting index value
    pub fn principal_currency(&self) -> f64 {
        match self.principal_unit {
            PrincipalUnit::Currency => self.principal,
            PrincipalUnit::IndexUnits => self.principal * self.index_unit_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_conversion() {
        let loan = LoanParameters {
            principal: 60_000_000.0,
            index_unit_value: 1000.0,
            ..Default::default()
        };
        assert_eq!(loan.principal_index_units(), 60_000.0);
        assert_eq!(loan.principal_currency(), 60_000_000.0);

        let ongoing = LoanParameters {
            principal: 45_000.0,
            principal_unit: PrincipalUnit::IndexUnits,
            index_unit_value: 1000.0,
            ..Default::default()
        };
        assert_eq!(ongoing.principal_index_units(), 45_000.0);
        assert_eq!(ongoing.principal_currency(), 45_000_000.0);
    }

    #[test]
    fn test_validation() {
        let base = LoanParameters {
            principal: 1_000_000.0,
            term_months: 120,
            ..Default::default()
        };
        assert!(base.validate().is_ok());

        let too_long = LoanParameters { term_months: 601, ..base.clone() };
        assert_eq!(
            too_long.validate(),
            Err(ConfigError::TooManyPeriods { requested: 601, max: MAX_PERIODS })
        );

        let no_index = LoanParameters { index_unit_value: 0.0, ..base.clone() };
        assert_eq!(no_index.validate(), Err(ConfigError::InvalidIndexValue(0.0)));

        let negative = LoanParameters { annual_nominal_rate: -0.01, ..base.clone() };
        assert!(matches!(negative.validate(), Err(ConfigError::NegativeRate { .. })));

        let bad_month = LoanParameters { start_period: YearMonth { year: 2025, month: 13 }, ..base.clone() };
        assert_eq!(
            bad_month.validate(),
            Err(ConfigError::InvalidStartPeriod { month: 13, year: 2025 })
        );
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        let base = LoanParameters {
            principal: 1_000_000.0,
            term_months: 120,
            ..Default::default()
        };

        let nan_principal = LoanParameters { principal: f64::NAN, ..base.clone() };
        assert!(!nan_principal.is_degenerate());
        assert!(matches!(
            nan_principal.validate(),
            Err(ConfigError::NotFinite { name: "principal", .. })
        ));

        let infinite_rate = LoanParameters { annual_nominal_rate: f64::INFINITY, ..base };
        assert!(matches!(
            infinite_rate.validate(),
            Err(ConfigError::NotFinite { name: "annual nominal rate", .. })
        ));
    }
}
