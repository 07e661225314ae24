//! Running variance of a payment series

use crate::calendar::YearMonth;

/// Percentage changes of one period's payment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodVariance {
    pub month_over_month_pct: f64,
    pub year_to_date_pct: f64,
    pub cumulative_pct: f64,
}

/// Tracks the reference values needed to compute variance inline while a
/// schedule is generated
#[derive(Debug, Clone, Default)]
pub struct VarianceTracker {
    first: Option<f64>,
    previous: f64,
    last_december: f64,
}

fn pct_change(current: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (current / reference - 1.0) * 100.0
    }
}

impl VarianceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the payment for `period` and return its variance.
    ///
    /// The year-to-date reference starts at the first payment and moves to
    /// every December payment once it has been observed.
    pub fn observe(&mut self, value: f64, period: YearMonth) -> PeriodVariance {
        let variance = match self.first {
            None => {
                self.first = Some(value);
                self.last_december = value;
                PeriodVariance::default()
            }
            Some(first) => PeriodVariance {
                month_over_month_pct: pct_change(value, self.previous),
                year_to_date_pct: pct_change(value, self.last_december),
                cumulative_pct: pct_change(value, first),
            },
        };

        self.previous = value;
        if period.is_december() {
            self.last_december = value;
        }

        variance
    }
}
