//! Sweep nominal rates and amortization systems for one loan
//!
//! Runs every combination against the bundled inflation timeline and prints
//! the first installment and total cost of each

use anyhow::{Context, Result};
use proyectar::analytics::Schedule;
use proyectar::{AmortizationMethod, FallbackMode, LoanParameters, MarketSnapshot, ScenarioRunner, YearMonth};
use std::path::Path;
use std::time::Instant;

const PRINCIPAL: f64 = 80_000_000.0;
const TERM_MONTHS: u32 = 240;
const RATES_PCT: [f64; 6] = [3.5, 4.5, 5.5, 6.5, 8.0, 9.5];

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let data_dir = Path::new(proyectar::timeline::loader::DEFAULT_DATA_PATH);
    let runner = ScenarioRunner::from_csv_path(data_dir, FallbackMode::Auto, None)
        .context("loading inflation timeline")?;
    let index_unit_value = MarketSnapshot::load_from(data_dir)
        .ok()
        .and_then(|m| m.index_unit_value())
        .unwrap_or(1.0);
    println!("Timeline loaded: {} months in {:?}", runner.timeline().len(), start.elapsed());

    let base = LoanParameters {
        principal: PRINCIPAL,
        term_months: TERM_MONTHS,
        start_period: YearMonth::current(),
        index_unit_value,
        ..Default::default()
    };

    let loans: Vec<LoanParameters> = [AmortizationMethod::French, AmortizationMethod::German]
        .iter()
        .flat_map(|&method| RATES_PCT.into_iter().map(move |pct| (method, pct)))
        .map(|(method, pct)| LoanParameters {
            amortization_method: method,
            annual_nominal_rate: pct / 100.0,
            ..base.clone()
        })
        .collect();

    let run_start = Instant::now();
    let with_inflation = runner.run_loans(&loans, true);
    let flat = runner.run_loans(&loans, false);
    println!("{} scenarios in {:?}\n", loans.len() * 2, run_start.elapsed());

    println!("{:>8} {:>6} {:>16} {:>18} {:>10} {:>18} {:>10}",
        "System", "Rate%", "First", "Total (indexed)", "Mult", "Total (flat)", "Mult");
    println!("{}", "-".repeat(92));

    for ((loan, indexed), flat) in loans.iter().zip(with_inflation).zip(flat) {
        let indexed: Schedule = indexed?;
        let flat: Schedule = flat?;
        println!("{:>8} {:>6.2} {:>16.2} {:>18.2} {:>10.2} {:>18.2} {:>10.2}",
            format!("{:?}", loan.amortization_method),
            loan.annual_nominal_rate * 100.0,
            indexed.totals.first_payment,
            indexed.totals.total_paid,
            indexed.totals.cost_multiplier,
            flat.totals.total_paid,
            flat.totals.cost_multiplier,
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
