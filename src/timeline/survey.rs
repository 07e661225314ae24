//! Expansion of the market expectations survey (REM) into monthly forecasts
//!
//! The survey publishes monthly medians for the next few months and year-over-year
//! ("i.a.") medians for the current and following calendar years. The annual
//! anchors are spread into monthly rates so the forecast covers whole years.

use super::record::InflationRecord;
use crate::calendar::YearMonth;
use crate::error::DataError;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;

/// One row of the survey results table
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRow {
    /// `YYYY-MM-DD` for monthly rows, `YYYY` for annual rows
    #[serde(rename = "Período")]
    pub period: String,
    #[serde(rename = "Referencia")]
    pub reference: String,
    /// Median in percent; non-numeric cells are ignored
    #[serde(rename = "Mediana")]
    pub median: String,
}

impl SurveyRow {
    pub fn new(period: &str, reference: &str, median: &str) -> Self {
        Self {
            period: period.to_string(),
            reference: reference.to_string(),
            median: median.to_string(),
        }
    }
}

fn round2(pct: f64) -> f64 {
    (pct * 100.0).round() / 100.0
}

fn parse_month(period: &str) -> Option<YearMonth> {
    let date = NaiveDate::parse_from_str(period.get(..10)?, "%Y-%m-%d").ok()?;
    Some(YearMonth::from(date))
}

fn parse_year(period: &str) -> Option<i32> {
    if period.len() == 4 && period.chars().all(|c| c.is_ascii_digit()) {
        period.parse().ok()
    } else {
        None
    }
}

/// Turn survey rows into a chronological monthly forecast series.
///
/// Monthly medians are kept as published. For the first forecast year the months
/// after the last monthly median receive the constant rate that completes the
/// year's anchor; each later anchor year is spread evenly over its 12 months.
/// Spread rates are rounded to two decimals in percent.
pub fn expand_survey(rows: &[SurveyRow]) -> Vec<InflationRecord> {
    let mut monthly: BTreeMap<YearMonth, f64> = BTreeMap::new();
    let mut anchors: BTreeMap<i32, f64> = BTreeMap::new();
    let mut seen = HashSet::new();

    for row in rows {
        let period = row.period.trim();
        let reference = row.reference.to_lowercase();
        let Some(median) = super::loader::parse_decimal(&row.median) else {
            continue;
        };
        if !seen.insert(format!("{}_{}", period, reference)) {
            continue;
        }

        if reference.contains("mensual") {
            if let Some(month) = parse_month(period) {
                monthly.insert(month, median);
            }
        } else if reference.contains("i.a.") {
            if let Some(year) = parse_year(period) {
                anchors.insert(year, median);
            }
        }
    }

    let Some((&first, _)) = monthly.iter().next() else {
        warn!("Survey contains no monthly medians; no forecast produced");
        return Vec::new();
    };

    let mut expanded = monthly.clone();

    let current_year = if first.month == 12 { first.year + 1 } else { first.year };
    let known_current: Vec<(&YearMonth, &f64)> = monthly
        .iter()
        .filter(|(period, _)| period.year == current_year)
        .collect();

    if let (Some(anchor), Some((last_known, _))) = (anchors.get(&current_year), known_current.last()) {
        if last_known.month < 12 {
            let target = 1.0 + anchor / 100.0;
            let accumulated: f64 = known_current.iter().map(|(_, pct)| 1.0 + *pct / 100.0).product();
            let remaining = 12 - last_known.month;
            let residual = (target / accumulated).powf(1.0 / remaining as f64) - 1.0;
            for month in (last_known.month + 1)..=12 {
                expanded
                    .entry(YearMonth::new(month, current_year))
                    .or_insert(round2(residual * 100.0));
            }
        }
    }

    for (&year, &anchor) in anchors.range(current_year + 1..) {
        let flat = round2(((1.0 + anchor / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0);
        for month in 1..=12 {
            expanded.entry(YearMonth::new(month, year)).or_insert(flat);
        }
    }

    debug!(
        "Survey expanded: {} monthly medians, {} annual anchors, {} forecast months",
        monthly.len(),
        anchors.len(),
        expanded.len()
    );

    expanded
        .into_iter()
        .map(|(period, pct)| InflationRecord::forecast(period.month, period.year, pct / 100.0))
        .collect()
}

/// Read survey rows from a semicolon-delimited table with
/// `Período;Referencia;Mediana` headers
pub fn load_survey_from_reader<R: Read>(reader: R) -> Result<Vec<SurveyRow>, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: SurveyRow = result?;
        if !row.period.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn survey() -> Vec<SurveyRow> {
        vec![
            SurveyRow::new("2025-01-31", "var. % mensual", "2.3"),
            SurveyRow::new("2025-02-28", "var. % mensual", "2.1"),
            SurveyRow::new("2025-03-31", "var. % mensual", "2.0"),
            SurveyRow::new("2025-03-31", "var. % mensual", "9.9"),
            SurveyRow::new("2025", "var. % i.a. dic", "27.0"),
            SurveyRow::new("2026", "var. % i.a. dic", "18.0"),
            SurveyRow::new("2027", "var. % i.a. dic", "-"),
        ]
    }

    #[test]
    fn test_monthly_medians_kept() {
        let records = expand_survey(&survey());
        assert_abs_diff_eq!(records[0].monthly_rate, 0.023, epsilon = 1e-12);
        // Duplicate (period, reference) rows are ignored
        assert_abs_diff_eq!(records[2].monthly_rate, 0.020, epsilon = 1e-12);
    }

    #[test]
    fn test_residual_completes_annual_anchor() {
        let records = expand_survey(&survey());
        let year_2025: Vec<_> = records.iter().filter(|r| r.year == 2025).collect();
        assert_eq!(year_2025.len(), 12);

        let accumulated: f64 = year_2025.iter().map(|r| 1.0 + r.monthly_rate).product();
        // Rounding the residual to 0.01% keeps the year within a few bp of the anchor
        assert_abs_diff_eq!(accumulated, 1.27, epsilon = 5e-4);

        let residuals: HashSet<u64> = year_2025[3..].iter().map(|r| r.monthly_rate.to_bits()).collect();
        assert_eq!(residuals.len(), 1);
    }

    #[test]
    fn test_later_anchor_spread_evenly() {
        let records = expand_survey(&survey());
        let year_2026: Vec<_> = records.iter().filter(|r| r.year == 2026).collect();
        assert_eq!(year_2026.len(), 12);
        // (1.18)^(1/12) - 1 = 1.3888% -> 1.39%
        assert_abs_diff_eq!(year_2026[0].monthly_rate, 0.0139, epsilon = 1e-12);
        assert!(records.iter().all(|r| r.year <= 2026));
    }

    #[test]
    fn test_chronological_output() {
        let records = expand_survey(&survey());
        let periods: Vec<_> = records.iter().map(|r| r.period()).collect();
        let mut sorted = periods.clone();
        sorted.sort();
        assert_eq!(periods, sorted);
    }

    #[test]
    fn test_december_start_moves_current_year() {
        let rows = vec![
            SurveyRow::new("2024-12-31", "mensual", "2.5"),
            SurveyRow::new("2025-01-31", "mensual", "2.2"),
            SurveyRow::new("2025", "i.a.", "25.0"),
        ];
        let records = expand_survey(&rows);
        // Dec 2024 + 12 months of 2025
        assert_eq!(records.len(), 13);
    }

    #[test]
    fn test_empty_survey() {
        let rows = vec![SurveyRow::new("2025", "i.a.", "25.0")];
        assert!(expand_survey(&rows).is_empty());
    }

    #[test]
    fn test_load_survey_from_reader() {
        let data = "Período;Referencia;Mediana\n2025-01-31;var. % mensual;2,3\n;;\n2025;var. % i.a.;27\n";
        let rows = load_survey_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(expand_survey(&rows).len(), 12);
    }
}
