//! ProyectAR CLI
//!
//! Command-line interface for mortgage and rental projections

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use proyectar::analytics::{affordability, gross_rental_yield, usd_equivalent};
use proyectar::mortgage::PrincipalUnit;
use proyectar::timeline::{loader, InflationMode};
use proyectar::{
    AmortizationEngine, AmortizationMethod, FallbackMode, InflationTimeline, LoanParameters,
    MarketSnapshot, RentalAdjustmentEngine, RentalParameters, Schedule, YearMonth,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "proyectar", version, about = "Mortgage and rental projections under inflation")]
struct Cli {
    /// Directory holding REM/, IPC/ and market/ data
    #[arg(long, global = true, default_value = loader::DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Rate for months beyond the forecast
    #[arg(long, global = true, value_enum, default_value_t = Fallback::Auto)]
    fallback: Fallback,

    /// Monthly fallback rate in percent (required with --fallback fixed)
    #[arg(long, global = true)]
    fallback_rate: Option<f64>,

    /// Number of periods printed to the console
    #[arg(long, global = true, default_value_t = 24)]
    rows: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Fallback {
    Auto,
    Fixed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum System {
    French,
    German,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a UVA mortgage
    Mortgage(MortgageArgs),
    /// Project a rental contract
    Rent(RentArgs),
}

#[derive(Debug, Args)]
struct MortgageArgs {
    /// Loan amount, or outstanding balance for ongoing loans
    #[arg(long)]
    amount: f64,

    /// Term in years for a new loan
    #[arg(long, conflicts_with = "remaining")]
    years: Option<u32>,

    /// Remaining installments of an ongoing loan
    #[arg(long)]
    remaining: Option<u32>,

    /// Outstanding balance is stated in UVA
    #[arg(long)]
    balance_in_uva: bool,

    /// Nominal annual rate in percent
    #[arg(long, default_value_t = 0.0)]
    rate: f64,

    #[arg(long, value_enum, default_value_t = System::French)]
    system: System,

    /// Monthly charges in percent of the original principal
    #[arg(long, default_value_t = 0.0)]
    extra_rate: f64,

    /// Annual inflation in percent instead of the inflation timeline
    #[arg(long)]
    manual_inflation: Option<f64>,

    /// First installment month (MM/YYYY), defaults to the current month
    #[arg(long, value_parser = parse_year_month)]
    start: Option<YearMonth>,

    /// UVA value, defaults to the market snapshot
    #[arg(long)]
    uva: Option<f64>,

    /// Monthly income for the affordability check
    #[arg(long)]
    salary: Option<f64>,
}

#[derive(Debug, Args)]
struct RentArgs {
    #[arg(long)]
    rent: f64,

    #[arg(long, default_value_t = 0.0)]
    expenses: f64,

    /// Months between rent adjustments
    #[arg(long)]
    cadence: u32,

    /// Contract duration in months
    #[arg(long)]
    duration: u32,

    /// Months since the last adjustment of a running contract
    #[arg(long, default_value_t = 0)]
    since_adjustment: u32,

    /// Keep expenses flat instead of indexing them monthly
    #[arg(long)]
    fixed_expenses: bool,

    /// Annual inflation in percent instead of the inflation timeline
    #[arg(long)]
    manual_inflation: Option<f64>,

    /// First payment month (MM/YYYY), defaults to the current month
    #[arg(long, value_parser = parse_year_month)]
    start: Option<YearMonth>,

    /// Monthly income for the affordability check
    #[arg(long)]
    salary: Option<f64>,

    /// Property value in dollars for the gross yield
    #[arg(long)]
    property_usd: Option<f64>,
}

fn parse_year_month(raw: &str) -> std::result::Result<YearMonth, String> {
    let (month, year) = raw
        .split_once('/')
        .ok_or_else(|| format!("expected MM/YYYY, got '{}'", raw))?;
    let month: u32 = month.trim().parse().map_err(|_| format!("invalid month in '{}'", raw))?;
    let year: i32 = year.trim().parse().map_err(|_| format!("invalid year in '{}'", raw))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month must be 1-12, got {}", month));
    }
    Ok(YearMonth::new(month, year))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("ProyectAR v{}", env!("CARGO_PKG_VERSION"));
    println!("===============\n");

    let records = loader::load_from(&cli.data_dir)
        .with_context(|| format!("loading inflation data from {}", cli.data_dir.display()))?;
    let mode = match cli.fallback {
        Fallback::Auto => FallbackMode::Auto,
        Fallback::Fixed => FallbackMode::Fixed,
    };
    let timeline = InflationTimeline::build(records, mode, cli.fallback_rate.map(|pct| pct / 100.0))?;
    if let Some((first, last)) = timeline.coverage() {
        println!("Inflation data: {} to {} ({} months)", first, last, timeline.len());
    }
    println!("Fallback rate: {:.2}% monthly ({:?})\n", timeline.fallback_rate() * 100.0, timeline.fallback_mode());

    let market = match MarketSnapshot::load_from(&cli.data_dir) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Market snapshot unavailable: {}", e);
            MarketSnapshot::default()
        }
    };

    match &cli.command {
        Command::Mortgage(args) => run_mortgage(args, &timeline, &market, cli.rows),
        Command::Rent(args) => run_rent(args, &timeline, &market, cli.rows),
    }
}

fn run_mortgage(args: &MortgageArgs, timeline: &InflationTimeline, market: &MarketSnapshot, rows: usize) -> Result<()> {
    let Some(index_unit_value) = args.uva.or_else(|| market.index_unit_value()) else {
        bail!("no UVA value available: pass --uva or refresh the market snapshot");
    };
    let term_months = match (args.years, args.remaining) {
        (Some(years), _) => years * 12,
        (None, Some(remaining)) => remaining,
        (None, None) => 0,
    };

    let loan = LoanParameters {
        principal: args.amount,
        principal_unit: if args.balance_in_uva { PrincipalUnit::IndexUnits } else { PrincipalUnit::Currency },
        term_months,
        annual_nominal_rate: args.rate / 100.0,
        amortization_method: match args.system {
            System::French => AmortizationMethod::French,
            System::German => AmortizationMethod::German,
        },
        start_period: args.start.unwrap_or_else(YearMonth::current),
        index_unit_value,
        extra_monthly_charge_rate: args.extra_rate / 100.0,
        manual_annual_inflation_pct: args.manual_inflation.unwrap_or(0.0),
    };

    let schedule = AmortizationEngine::new(timeline).generate(&loan, args.manual_inflation.is_none())?;
    if schedule.is_empty() {
        println!("Nothing to project: set an amount and a term.");
        return Ok(());
    }

    println!("Loan: {:.2} over {} months at {:.2}% ({:?})", loan.principal_currency(), term_months, args.rate, loan.amortization_method);
    println!("  UVA value: {:.2}", index_unit_value);
    println!();

    print_schedule(&schedule, rows, true);

    let totals = &schedule.totals;
    println!("\nSummary:");
    println!("  Installments: {}", totals.periods);
    println!("  First installment: ${:.2}", totals.first_payment);
    if let Some(usd) = usd_equivalent(totals.first_payment, market.fx_rate().unwrap_or(0.0)) {
        println!("    (USD {:.0} at official rate)", usd);
    }
    println!("  Total interest: ${:.2}", totals.total_interest_or_expenses);
    println!("  Total charges: ${:.2}", totals.total_extra_charges);
    println!("  Total paid: ${:.2}", totals.total_paid);
    println!("  Cost multiplier: {:.2}x", totals.cost_multiplier);
    if let Some(halfway) = schedule.halfway_period() {
        println!("  Half of the loan repaid at installment {} ({})", halfway.period_index, halfway.period_label);
    }
    if let Some(a) = args.salary.and_then(|income| affordability(totals.first_payment, income)) {
        println!(
            "  First installment is {:.1}% of income{}",
            a.ratio * 100.0,
            if a.exceeds_limit { " (above 30%)" } else { "" }
        );
    }

    Ok(())
}

fn run_rent(args: &RentArgs, timeline: &InflationTimeline, market: &MarketSnapshot, rows: usize) -> Result<()> {
    let rental = RentalParameters {
        base_rent: args.rent,
        base_expenses: args.expenses,
        adjustment_cadence_months: args.cadence,
        duration_months: args.duration,
        expenses_track_inflation: !args.fixed_expenses,
        months_elapsed_since_last_adjustment: args.since_adjustment,
        start_period: args.start.unwrap_or_else(YearMonth::current),
        inflation_mode: match args.manual_inflation {
            Some(annual_pct) => InflationMode::Manual { annual_pct },
            None => InflationMode::Timeline,
        },
    };

    let schedule = RentalAdjustmentEngine::new(timeline).generate(&rental)?;
    if schedule.is_empty() {
        println!("Nothing to project: set a rent and a duration.");
        return Ok(());
    }

    println!("Rent: {:.2} + {:.2} expenses, adjusted every {} months for {} months", args.rent, args.expenses, args.cadence, args.duration);
    println!();

    print_schedule(&schedule, rows, false);

    let totals = &schedule.totals;
    let first_rent = schedule.records[0].interest_or_rent_component;
    println!("\nSummary:");
    println!("  First payment: ${:.2}", totals.first_payment);
    println!("  Total expenses: ${:.2}", totals.total_interest_or_expenses);
    println!("  Total contract: ${:.2}", totals.total_paid);
    println!("  Multiplier vs zero inflation: {:.2}x", totals.cost_multiplier);
    if let Some(a) = args.salary.and_then(|income| affordability(totals.first_payment, income)) {
        println!(
            "  First payment is {:.1}% of income{}",
            a.ratio * 100.0,
            if a.exceeds_limit { " (above 30%)" } else { "" }
        );
    }
    if let (Some(fx), Some(value)) = (market.fx_rate(), args.property_usd) {
        if let Some(y) = gross_rental_yield(first_rent, fx, value) {
            println!("  Gross yield: {:.2}% ({:?})", y.gross_yield_pct, y.band);
        }
    }

    Ok(())
}

fn print_schedule(schedule: &Schedule, rows: usize, loan: bool) {
    if loan {
        println!("{:>5} {:>9} {:>16} {:>14} {:>14} {:>12} {:>18} {:>8} {:>8}",
            "Month", "Period", "Installment", "Principal", "Interest", "Charges", "Balance", "MoM%", "Source");
    } else {
        println!("{:>5} {:>9} {:>16} {:>14} {:>14} {:>8} {:>8} {:>8}",
            "Month", "Period", "Total", "Rent", "Expenses", "MoM%", "YTD%", "Source");
    }
    println!("{}", "-".repeat(110));

    for row in schedule.records.iter().take(rows) {
        if loan {
            println!("{:>5} {:>9} {:>16.2} {:>14.2} {:>14.2} {:>12.2} {:>18.2} {:>8.2} {:>8}{}",
                row.period_index,
                row.period.short_label(),
                row.total_payment,
                row.principal_component,
                row.interest_or_rent_component,
                row.extra_charges,
                row.remaining_balance.unwrap_or(0.0),
                row.month_over_month_change_pct,
                row.inflation_source,
                if row.is_halfway_milestone { "  <- 50%" } else { "" },
            );
        } else {
            println!("{:>5} {:>9} {:>16.2} {:>14.2} {:>14.2} {:>8.2} {:>8.2} {:>8}{}",
                row.period_index,
                row.period.short_label(),
                row.total_payment,
                row.interest_or_rent_component,
                row.extra_charges,
                row.month_over_month_change_pct,
                row.year_to_date_change_pct,
                row.inflation_source,
                if row.is_adjustment_period { "  *" } else { "" },
            );
        }
    }

    if schedule.len() > rows {
        println!("... ({} more months)", schedule.len() - rows);
    }
}
