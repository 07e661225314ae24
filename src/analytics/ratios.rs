//! Summary ratios derived from the first payment of a schedule

use serde::{Deserialize, Serialize};

/// Share of monthly income above which a payment is flagged
pub const AFFORDABILITY_LIMIT: f64 = 0.30;

/// First payment relative to monthly income
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    pub ratio: f64,
    pub exceeds_limit: bool,
}

/// Affordability of `first_payment`; `None` until both amounts are positive
pub fn affordability(first_payment: f64, monthly_income: f64) -> Option<Affordability> {
    if first_payment <= 0.0 || monthly_income <= 0.0 {
        return None;
    }
    let ratio = first_payment / monthly_income;
    Some(Affordability {
        ratio,
        exceeds_limit: ratio > AFFORDABILITY_LIMIT,
    })
}

/// Gross yield band for a rented property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldBand {
    /// Below 4%
    Low,
    /// 4% to 6%
    Fair,
    /// Above 6%
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentalYield {
    pub annual_rent_usd: f64,
    pub gross_yield_pct: f64,
    pub band: YieldBand,
}

/// Annual gross yield of a property valued in dollars, from the first rent
/// converted at the spot rate
pub fn gross_rental_yield(first_rent: f64, fx_rate: f64, property_value_usd: f64) -> Option<RentalYield> {
    if fx_rate <= 0.0 || property_value_usd <= 0.0 {
        return None;
    }
    let annual_rent_usd = first_rent * 12.0 / fx_rate;
    let gross_yield_pct = annual_rent_usd / property_value_usd * 100.0;
    let band = if gross_yield_pct < 4.0 {
        YieldBand::Low
    } else if gross_yield_pct <= 6.0 {
        YieldBand::Fair
    } else {
        YieldBand::High
    };
    Some(RentalYield { annual_rent_usd, gross_yield_pct, band })
}

/// Dollar equivalent of a currency amount at the spot rate
pub fn usd_equivalent(amount: f64, fx_rate: f64) -> Option<f64> {
    (fx_rate > 0.0).then(|| amount / fx_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_affordability() {
        let a = affordability(350_000.0, 1_000_000.0).unwrap();
        assert_relative_eq!(a.ratio, 0.35);
        assert!(a.exceeds_limit);

        assert!(!affordability(300_000.0, 1_000_000.0).unwrap().exceeds_limit);
        assert!(affordability(300_000.0, 0.0).is_none());
    }

    #[test]
    fn test_yield_bands() {
        // 500k/month at 1000 per dollar = 6000 USD/year
        let y = gross_rental_yield(500_000.0, 1000.0, 120_000.0).unwrap();
        assert_relative_eq!(y.annual_rent_usd, 6000.0);
        assert_relative_eq!(y.gross_yield_pct, 5.0);
        assert_eq!(y.band, YieldBand::Fair);

        assert_eq!(gross_rental_yield(500_000.0, 1000.0, 200_000.0).unwrap().band, YieldBand::Low);
        assert_eq!(gross_rental_yield(500_000.0, 1000.0, 80_000.0).unwrap().band, YieldBand::High);
        assert!(gross_rental_yield(500_000.0, 0.0, 80_000.0).is_none());
    }

    #[test]
    fn test_usd_equivalent() {
        assert_eq!(usd_equivalent(1_000_000.0, 1000.0), Some(1000.0));
        assert_eq!(usd_equivalent(1_000_000.0, 0.0), None);
    }
}
