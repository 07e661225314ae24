//! Stepped rent adjustment
//!
//! Inflation accumulates month by month but the rent only absorbs it at cadence
//! boundaries. Expenses, when indexed, follow inflation every month. A month's
//! rate takes effect from the following payment on.

use super::params::RentalParameters;
use crate::analytics::{PeriodRecord, Schedule, ScheduleKind, ScheduleTotals, VarianceTracker};
use crate::calendar::YearMonth;
use crate::error::Result;
use crate::timeline::InflationTimeline;
use log::debug;

/// Rental schedule generator over a shared inflation timeline
#[derive(Debug, Clone, Copy)]
pub struct RentalAdjustmentEngine<'a> {
    timeline: &'a InflationTimeline,
}

impl<'a> RentalAdjustmentEngine<'a> {
    pub fn new(timeline: &'a InflationTimeline) -> Self {
        Self { timeline }
    }

    /// Lazily produce the monthly payments of `rental`
    pub fn periods(&self, rental: &RentalParameters) -> Result<RentalPeriods<'a>> {
        let degenerate = rental.is_degenerate();
        if !degenerate {
            rental.validate()?;
        }

        let mut state = RentalState::from_rental(rental);
        if !degenerate {
            state.accumulated_factor = self.elapsed_factor(rental);
        }

        Ok(RentalPeriods {
            timeline: self.timeline,
            rental: rental.clone(),
            state,
            variance: VarianceTracker::new(),
            finished: degenerate,
        })
    }

    /// Generate the complete schedule with totals
    pub fn generate(&self, rental: &RentalParameters) -> Result<Schedule> {
        if rental.is_degenerate() {
            return Ok(Schedule::empty(ScheduleKind::Rental));
        }

        let records: Vec<PeriodRecord> = self.periods(rental)?.collect();
        let totals = ScheduleTotals::for_rental(&records, rental.duration_months);

        debug!(
            "Rental schedule: {} months, first {:.2}, total {:.2} ({:.2}x vs zero inflation)",
            totals.periods, totals.first_payment, totals.total_paid, totals.cost_multiplier
        );

        Ok(Schedule {
            kind: ScheduleKind::Rental,
            records,
            totals,
        })
    }

    /// Inflation accumulated between the last revaluation and the first
    /// simulated month of an in-progress contract
    fn elapsed_factor(&self, rental: &RentalParameters) -> f64 {
        let elapsed = rental.months_elapsed_since_last_adjustment as i64;
        (1..=elapsed)
            .map(|back| {
                let month = rental.start_period.offset(-back);
                rental.inflation_mode.sample(self.timeline, month).factor()
            })
            .product()
    }
}

/// Rent, expenses and accumulated inflation between two payments
#[derive(Debug, Clone)]
pub struct RentalState {
    /// Payments already simulated
    pub period_index: u32,

    /// Calendar month of the next payment
    pub period: YearMonth,

    pub rent: f64,
    pub expenses: f64,

    /// Inflation accumulated since the last revaluation
    pub accumulated_factor: f64,

    /// Rate of the last simulated month, applied at the next payment
    pub pending_rate: Option<f64>,
}

impl RentalState {
    pub fn from_rental(rental: &RentalParameters) -> Self {
        Self {
            period_index: 0,
            period: rental.start_period,
            rent: rental.base_rent,
            expenses: rental.base_expenses,
            accumulated_factor: 1.0,
            pending_rate: None,
        }
    }
}

/// Iterator over the monthly payments of one rental contract
#[derive(Debug, Clone)]
pub struct RentalPeriods<'a> {
    timeline: &'a InflationTimeline,
    rental: RentalParameters,
    state: RentalState,
    variance: VarianceTracker,
    finished: bool,
}

impl RentalPeriods<'_> {
    fn calculate_period(&mut self) -> PeriodRecord {
        let period_index = self.state.period_index + 1;

        if let Some(rate) = self.state.pending_rate.take() {
            self.state.accumulated_factor *= 1.0 + rate;
            if self.rental.expenses_track_inflation {
                self.state.expenses *= 1.0 + rate;
            }
        }

        let adjusted = self.rental.is_adjustment_period(period_index);
        if adjusted {
            self.state.rent *= self.state.accumulated_factor;
            self.state.accumulated_factor = 1.0;
        }

        let mut row = PeriodRecord::new(period_index, self.state.period);
        row.interest_or_rent_component = self.state.rent;
        row.extra_charges = self.state.expenses;
        row.total_payment = self.state.rent + self.state.expenses;
        row.is_adjustment_period = adjusted;

        let variance = self.variance.observe(row.total_payment, self.state.period);
        row.month_over_month_change_pct = variance.month_over_month_pct;
        row.year_to_date_change_pct = variance.year_to_date_pct;
        row.cumulative_change_pct = variance.cumulative_pct;

        let sample = self.rental.inflation_mode.sample(self.timeline, self.state.period);
        row.inflation_rate = sample.rate;
        row.inflation_source = sample.source;

        self.state.pending_rate = Some(sample.rate);
        self.state.period = self.state.period.next();
        self.state.period_index = period_index;
        row
    }
}

impl Iterator for RentalPeriods<'_> {
    type Item = PeriodRecord;

    fn next(&mut self) -> Option<PeriodRecord> {
        if self.finished || self.state.period_index >= self.rental.duration_months {
            self.finished = true;
            return None;
        }
        Some(self.calculate_period())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::timeline::{FallbackMode, InflationMode, InflationRecord, InflationSource};
    use approx::assert_relative_eq;

    fn contract(cadence: u32) -> RentalParameters {
        RentalParameters {
            base_rent: 1000.0,
            base_expenses: 0.0,
            adjustment_cadence_months: cadence,
            duration_months: 12,
            expenses_track_inflation: false,
            months_elapsed_since_last_adjustment: 0,
            start_period: YearMonth::new(1, 2025),
            inflation_mode: InflationMode::Timeline,
        }
    }

    #[test]
    fn test_rent_is_stepped() {
        let r: f64 = 0.02;
        let timeline = InflationTimeline::constant(r).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        let schedule = engine.generate(&contract(4)).unwrap();

        for row in &schedule.records[..4] {
            assert_eq!(row.interest_or_rent_component, 1000.0);
        }
        assert_relative_eq!(schedule.records[4].interest_or_rent_component, 1000.0 * (1.0 + r).powi(4), max_relative = 1e-12);
        assert_relative_eq!(schedule.records[7].interest_or_rent_component, 1000.0 * (1.0 + r).powi(4), max_relative = 1e-12);
        assert_relative_eq!(schedule.records[8].interest_or_rent_component, 1000.0 * (1.0 + r).powi(8), max_relative = 1e-12);

        let adjusted: Vec<u32> = schedule.records.iter().filter(|r| r.is_adjustment_period).map(|r| r.period_index).collect();
        assert_eq!(adjusted, vec![5, 9]);
    }

    #[test]
    fn test_expenses_compound_monthly() {
        let r: f64 = 0.03;
        let timeline = InflationTimeline::constant(r).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        let rental = RentalParameters {
            base_expenses: 200.0,
            expenses_track_inflation: true,
            ..contract(6)
        };
        let schedule = engine.generate(&rental).unwrap();

        for (k, row) in schedule.records.iter().enumerate() {
            assert_relative_eq!(row.extra_charges, 200.0 * (1.0 + r).powi(k as i32), max_relative = 1e-12);
            assert_relative_eq!(row.total_payment, row.interest_or_rent_component + row.extra_charges);
            assert_eq!(row.principal_component, 0.0);
            assert!(row.remaining_balance.is_none());
        }

        let flat = RentalParameters { expenses_track_inflation: false, ..rental };
        let schedule = engine.generate(&flat).unwrap();
        assert!(schedule.records.iter().all(|r| r.extra_charges == 200.0));
    }

    #[test]
    fn test_in_progress_contract_uses_past_inflation() {
        let records = vec![
            InflationRecord::realized(11, 2024, 0.05),
            InflationRecord::realized(12, 2024, 0.05),
        ];
        let timeline = InflationTimeline::build(records, FallbackMode::Fixed, Some(0.02)).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        let rental = RentalParameters {
            months_elapsed_since_last_adjustment: 2,
            ..contract(4)
        };
        let schedule = engine.generate(&rental).unwrap();

        assert_eq!(schedule.records[1].interest_or_rent_component, 1000.0);
        assert!(schedule.records[2].is_adjustment_period);
        let expected = 1000.0 * 1.05f64.powi(2) * 1.02f64.powi(2);
        assert_relative_eq!(schedule.records[2].interest_or_rent_component, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_inflation_multiplier() {
        let timeline = InflationTimeline::constant(0.0).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        let schedule = engine.generate(&contract(3)).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_relative_eq!(schedule.totals.cost_multiplier, 1.0);
        assert_relative_eq!(schedule.totals.total_paid, 12_000.0);
    }

    #[test]
    fn test_invalid_cadence_is_rejected() {
        let timeline = InflationTimeline::constant(0.02).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        assert!(engine.generate(&contract(0)).is_err());

        // An empty form is not validated
        let unset = RentalParameters { duration_months: 0, ..contract(0) };
        assert!(engine.generate(&unset).unwrap().is_empty());

        // Rejected before any past inflation is accumulated
        let endless = RentalParameters {
            adjustment_cadence_months: u32::MAX,
            months_elapsed_since_last_adjustment: u32::MAX - 1,
            ..contract(4)
        };
        assert!(matches!(engine.generate(&endless), Err(ConfigError::TooManyPeriods { .. })));
    }

    #[test]
    fn test_invalid_start_month_is_rejected() {
        let timeline = InflationTimeline::constant(0.02).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        let rental = RentalParameters {
            start_period: YearMonth { year: 2025, month: 13 },
            ..contract(4)
        };
        assert_eq!(
            engine.generate(&rental).unwrap_err(),
            ConfigError::InvalidStartPeriod { month: 13, year: 2025 }
        );
    }

    #[test]
    fn test_manual_inflation_and_variance() {
        let timeline = InflationTimeline::constant(0.5).unwrap();
        let engine = RentalAdjustmentEngine::new(&timeline);
        let rental = RentalParameters {
            inflation_mode: InflationMode::Manual { annual_pct: 26.824179456254 },
            start_period: YearMonth::new(11, 2025),
            ..contract(2)
        };
        let schedule = engine.generate(&rental).unwrap();

        assert!(schedule.records.iter().all(|r| r.inflation_source == InflationSource::Manual));
        // Jan 2026 is an adjustment month: two months of 2% since November
        let jan = &schedule.records[2];
        assert_eq!(jan.period, YearMonth::new(1, 2026));
        assert_relative_eq!(jan.month_over_month_change_pct, 4.04, max_relative = 1e-9);
        assert_relative_eq!(jan.year_to_date_change_pct, 4.04, max_relative = 1e-9);
    }
}
