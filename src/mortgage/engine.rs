//! Amortization engine for index-linked loans
//!
//! Balances are amortized in index units. Each installment is converted to
//! currency at the index value of its month, and the index is then revalued by
//! that month's inflation before the next installment.

use super::params::{AmortizationMethod, LoanParameters};
use super::state::LoanState;
use crate::analytics::{PeriodRecord, Schedule, ScheduleKind, ScheduleTotals, VarianceTracker};
use crate::error::Result;
use crate::timeline::{InflationMode, InflationTimeline};
use log::debug;

/// Residual balance (relative to the original) treated as fully repaid
const BALANCE_TOLERANCE: f64 = 1e-9;

/// Loan schedule generator over a shared inflation timeline
#[derive(Debug, Clone, Copy)]
pub struct AmortizationEngine<'a> {
    timeline: &'a InflationTimeline,
}

impl<'a> AmortizationEngine<'a> {
    pub fn new(timeline: &'a InflationTimeline) -> Self {
        Self { timeline }
    }

    /// Lazily produce the installments of `loan`.
    ///
    /// With `inflation_applied` the index follows the timeline; otherwise it
    /// grows at the flat monthly equivalent of the loan's manual annual rate.
    /// Degenerate loans yield no periods.
    pub fn periods(&self, loan: &LoanParameters, inflation_applied: bool) -> Result<LoanPeriods<'a>> {
        let inflation = if inflation_applied {
            InflationMode::Timeline
        } else {
            InflationMode::Manual {
                annual_pct: loan.manual_annual_inflation_pct,
            }
        };

        let degenerate = loan.is_degenerate();
        if !degenerate {
            loan.validate()?;
            inflation.validate()?;
        }

        Ok(LoanPeriods {
            timeline: self.timeline,
            inflation,
            method: loan.amortization_method,
            term_months: loan.term_months,
            monthly_rate: loan.monthly_nominal_rate(),
            extra_charge_rate: loan.extra_monthly_charge_rate,
            state: LoanState::from_loan(loan),
            variance: VarianceTracker::new(),
            finished: degenerate,
        })
    }

    /// Generate the complete schedule with totals
    pub fn generate(&self, loan: &LoanParameters, inflation_applied: bool) -> Result<Schedule> {
        if loan.is_degenerate() {
            return Ok(Schedule::empty(ScheduleKind::Loan));
        }

        let records: Vec<PeriodRecord> = self.periods(loan, inflation_applied)?.collect();
        let totals = ScheduleTotals::for_loan(&records, loan.principal_currency());

        debug!(
            "Loan schedule: {} installments, first {:.2}, total paid {:.2} ({:.2}x)",
            totals.periods, totals.first_payment, totals.total_paid, totals.cost_multiplier
        );

        Ok(Schedule {
            kind: ScheduleKind::Loan,
            records,
            totals,
        })
    }
}

/// Iterator over the installments of one loan
#[derive(Debug, Clone)]
pub struct LoanPeriods<'a> {
    timeline: &'a InflationTimeline,
    inflation: InflationMode,
    method: AmortizationMethod,
    term_months: u32,
    monthly_rate: f64,
    extra_charge_rate: f64,
    state: LoanState,
    variance: VarianceTracker,
    finished: bool,
}

impl LoanPeriods<'_> {
    /// Principal repaid this period in index units, before clamping
    fn scheduled_principal(&self, interest_units: f64) -> f64 {
        let state = &self.state;
        match self.method {
            AmortizationMethod::French => {
                let n = state.remaining_periods(self.term_months) as f64;
                let r = self.monthly_rate;
                if r > 0.0 {
                    let installment = state.balance_units * r / (1.0 - (1.0 + r).powf(-n));
                    installment - interest_units
                } else {
                    state.balance_units / n
                }
            }
            AmortizationMethod::German => state.constant_principal_units,
        }
    }

    fn calculate_period(&mut self) -> PeriodRecord {
        let interest_units = self.state.balance_units * self.monthly_rate;
        let mut principal_units = self.scheduled_principal(interest_units);

        // Final-period overshoot and floating-point residue both close the loan
        if principal_units >= self.state.balance_units {
            principal_units = self.state.balance_units;
            self.state.balance_units = 0.0;
        } else {
            self.state.balance_units -= principal_units;
            if self.state.balance_units <= self.state.original_units * BALANCE_TOLERANCE {
                principal_units += self.state.balance_units;
                self.state.balance_units = 0.0;
            }
        }

        let index_value = self.state.index_value;
        let period_index = self.state.period_index + 1;
        let mut row = PeriodRecord::new(period_index, self.state.period);

        row.principal_component = principal_units * index_value;
        row.interest_or_rent_component = interest_units * index_value;
        row.extra_charges = self.extra_charge_rate * self.state.original_units * index_value;
        row.total_payment = row.principal_component + row.interest_or_rent_component + row.extra_charges;
        row.remaining_balance = Some(self.state.balance_units * index_value);
        row.index_unit_value = Some(index_value);

        if !self.state.halfway_reached && self.state.balance_units <= self.state.original_units / 2.0 {
            row.is_halfway_milestone = true;
            self.state.halfway_reached = true;
        }

        let variance = self.variance.observe(row.total_payment, self.state.period);
        row.month_over_month_change_pct = variance.month_over_month_pct;
        row.year_to_date_change_pct = variance.year_to_date_pct;
        row.cumulative_change_pct = variance.cumulative_pct;

        let sample = self.inflation.sample(self.timeline, self.state.period);
        row.inflation_rate = sample.rate;
        row.inflation_source = sample.source;

        self.state.advance_month(sample.rate);
        row
    }
}

impl Iterator for LoanPeriods<'_> {
    type Item = PeriodRecord;

    fn next(&mut self) -> Option<PeriodRecord> {
        if self.finished || self.state.period_index >= self.term_months || self.state.is_repaid() {
            self.finished = true;
            return None;
        }
        Some(self.calculate_period())
    }
}
