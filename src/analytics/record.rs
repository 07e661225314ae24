//! Output row shared by the loan and rental engines

use crate::calendar::YearMonth;
use crate::timeline::InflationSource;
use serde::{Deserialize, Serialize};

/// A single simulated month.
///
/// Loans fill `principal_component` with the amortized principal,
/// `interest_or_rent_component` with interest and `extra_charges` with the
/// monthly administrative charge. Rentals put the rent in
/// `interest_or_rent_component` and expenses in `extra_charges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    // Timing
    pub period_index: u32,
    pub period: YearMonth,
    pub period_label: String,

    // Payment breakdown (currency)
    pub total_payment: f64,
    pub principal_component: f64,
    pub interest_or_rent_component: f64,
    pub extra_charges: f64,
    /// Outstanding balance after this payment (loans only)
    pub remaining_balance: Option<f64>,
    /// Currency value of one index unit when the payment is made (loans only)
    pub index_unit_value: Option<f64>,

    // Inflation applied after this period
    pub inflation_rate: f64,
    pub inflation_source: InflationSource,

    // Variance of total_payment
    pub month_over_month_change_pct: f64,
    pub year_to_date_change_pct: f64,
    pub cumulative_change_pct: f64,

    /// First period at which half the original balance is repaid (loans only)
    pub is_halfway_milestone: bool,
    /// Rent was revalued in this period (rentals only)
    pub is_adjustment_period: bool,
}

impl PeriodRecord {
    /// Create a record for `period` with zeroed amounts
    pub fn new(period_index: u32, period: YearMonth) -> Self {
        Self {
            period_index,
            period,
            period_label: period.label(),
            total_payment: 0.0,
            principal_component: 0.0,
            interest_or_rent_component: 0.0,
            extra_charges: 0.0,
            remaining_balance: None,
            index_unit_value: None,
            inflation_rate: 0.0,
            inflation_source: InflationSource::Fallback,
            month_over_month_change_pct: 0.0,
            year_to_date_change_pct: 0.0,
            cumulative_change_pct: 0.0,
            is_halfway_milestone: false,
            is_adjustment_period: false,
        }
    }
}
