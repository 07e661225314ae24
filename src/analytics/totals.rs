//! Aggregate totals and the complete schedule returned by the engines

use super::record::PeriodRecord;
use serde::{Deserialize, Serialize};

/// Which engine produced a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleKind {
    Loan,
    Rental,
}

/// Aggregate figures over a schedule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub periods: u32,
    pub total_paid: f64,
    pub total_principal: f64,
    /// Interest for loans, expenses for rentals
    pub total_interest_or_expenses: f64,
    pub total_extra_charges: f64,
    pub first_payment: f64,
    /// Original principal (loans) or first rent times duration (rentals)
    pub baseline: f64,
    /// `total_paid / baseline`, 0 when the baseline is 0
    pub cost_multiplier: f64,
}

impl ScheduleTotals {
    fn accumulate(records: &[PeriodRecord], baseline: f64) -> Self {
        let total_paid: f64 = records.iter().map(|r| r.total_payment).sum();
        let total_principal: f64 = records.iter().map(|r| r.principal_component).sum();
        let total_extra_charges: f64 = records.iter().map(|r| r.extra_charges).sum();

        Self {
            periods: records.len() as u32,
            total_paid,
            total_principal,
            total_interest_or_expenses: 0.0,
            total_extra_charges,
            first_payment: records.first().map(|r| r.total_payment).unwrap_or(0.0),
            baseline,
            cost_multiplier: if baseline > 0.0 { total_paid / baseline } else { 0.0 },
        }
    }

    /// Totals for a loan schedule; `original_principal` is in currency
    pub fn for_loan(records: &[PeriodRecord], original_principal: f64) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        Self {
            total_interest_or_expenses: records.iter().map(|r| r.interest_or_rent_component).sum(),
            ..Self::accumulate(records, original_principal)
        }
    }

    /// Totals for a rental schedule measured against a zero-inflation contract
    pub fn for_rental(records: &[PeriodRecord], duration_months: u32) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let first_rent = records[0].interest_or_rent_component;
        Self {
            total_interest_or_expenses: records.iter().map(|r| r.extra_charges).sum(),
            ..Self::accumulate(records, first_rent * duration_months as f64)
        }
    }
}

/// Complete schedule: ordered period records plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub kind: ScheduleKind,
    pub records: Vec<PeriodRecord>,
    pub totals: ScheduleTotals,
}

impl Schedule {
    /// Schedule with no periods, used for inputs that are not configured yet
    pub fn empty(kind: ScheduleKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            totals: ScheduleTotals::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of the first `years` years
    pub fn first_years(&self, years: u32) -> &[PeriodRecord] {
        let count = (years as usize * 12).min(self.records.len());
        &self.records[..count]
    }

    /// Period flagged as the halfway milestone, if any
    pub fn halfway_period(&self) -> Option<&PeriodRecord> {
        self.records.iter().find(|r| r.is_halfway_milestone)
    }

    pub fn into_parts(self) -> (Vec<PeriodRecord>, ScheduleTotals) {
        (self.records, self.totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use approx::assert_relative_eq;

    fn loan_rows() -> Vec<PeriodRecord> {
        let start = YearMonth::new(1, 2025);
        (0..3)
            .map(|i| {
                let mut row = PeriodRecord::new(i + 1, start.offset(i as i64));
                row.principal_component = 100.0;
                row.interest_or_rent_component = 10.0 - i as f64;
                row.extra_charges = 1.0;
                row.total_payment = row.principal_component + row.interest_or_rent_component + row.extra_charges;
                row
            })
            .collect()
    }

    #[test]
    fn test_loan_totals() {
        let rows = loan_rows();
        let totals = ScheduleTotals::for_loan(&rows, 300.0);
        assert_eq!(totals.periods, 3);
        assert_relative_eq!(totals.total_paid, 300.0 + 27.0 + 3.0);
        assert_relative_eq!(totals.total_interest_or_expenses, 27.0);
        assert_relative_eq!(totals.first_payment, 111.0);
        assert_relative_eq!(totals.cost_multiplier, 330.0 / 300.0);
    }

    #[test]
    fn test_rental_totals() {
        let start = YearMonth::new(1, 2025);
        let rows: Vec<_> = (0..4)
            .map(|i| {
                let mut row = PeriodRecord::new(i + 1, start.offset(i as i64));
                row.interest_or_rent_component = if i < 2 { 1000.0 } else { 1200.0 };
                row.extra_charges = 100.0;
                row.total_payment = row.interest_or_rent_component + row.extra_charges;
                row
            })
            .collect();

        let totals = ScheduleTotals::for_rental(&rows, 4);
        assert_relative_eq!(totals.baseline, 4000.0);
        assert_relative_eq!(totals.total_interest_or_expenses, 400.0);
        assert_relative_eq!(totals.cost_multiplier, 4800.0 / 4000.0);
    }

    #[test]
    fn test_empty_totals() {
        assert_eq!(ScheduleTotals::for_loan(&[], 1000.0), ScheduleTotals::default());
        assert_eq!(ScheduleTotals::for_rental(&[], 12), ScheduleTotals::default());
    }

    #[test]
    fn test_first_years_view() {
        let schedule = Schedule {
            kind: ScheduleKind::Loan,
            totals: ScheduleTotals::for_loan(&loan_rows(), 300.0),
            records: loan_rows(),
        };
        assert_eq!(schedule.first_years(1).len(), 3);
        assert_eq!(schedule.first_years(0).len(), 0);
        assert!(schedule.halfway_period().is_none());
    }
}
