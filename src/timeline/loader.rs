//! CSV loaders for inflation tables
//!
//! Tables are semicolon-delimited with a header row and the columns
//! `mes;año;valor_mensual[;periodo]`. Rates are monthly percentages and may use
//! either `,` or `.` as decimal separator.

use super::record::{InflationRecord, RateOrigin};
use super::survey;
use crate::error::DataError;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Survey forecast table, relative to the data directory
pub const FORECAST_FILE: &str = "REM/proyeccion_inflacion.csv";

/// Realized monthly index table, relative to the data directory
pub const REALIZED_FILE: &str = "IPC/ipc_mensual.csv";

/// Raw survey results, used when no expanded forecast table is present
pub const SURVEY_FILE: &str = "REM/rem_resultados.csv";

/// Parse a decimal that may use a comma separator
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

fn field<'a>(record: &'a StringRecord, idx: usize, name: &'static str, line: u64) -> Result<&'a str, DataError> {
    record.get(idx).map(str::trim).ok_or_else(|| DataError::InvalidField {
        line,
        field: name,
        value: String::new(),
    })
}

fn parse_row(record: &StringRecord, origin: RateOrigin) -> Result<InflationRecord, DataError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let invalid = |field: &'static str, value: &str| DataError::InvalidField {
        line,
        field,
        value: value.to_string(),
    };

    let raw_month = field(record, 0, "mes", line)?;
    let month: u32 = raw_month.parse().map_err(|_| invalid("mes", raw_month))?;
    if !(1..=12).contains(&month) {
        return Err(invalid("mes", raw_month));
    }

    let raw_year = field(record, 1, "año", line)?;
    let year: i32 = raw_year.parse().map_err(|_| invalid("año", raw_year))?;

    let raw_value = field(record, 2, "valor_mensual", line)?;
    let pct = parse_decimal(raw_value).ok_or_else(|| invalid("valor_mensual", raw_value))?;

    Ok(InflationRecord::new(month, year, pct / 100.0, origin))
}

/// Load records from any reader (e.g., string buffer, network stream)
pub fn load_records_from_reader<R: Read>(reader: R, origin: RateOrigin) -> Result<Vec<InflationRecord>, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        if row.iter().all(|f| f.is_empty()) {
            continue;
        }
        records.push(parse_row(&row, origin)?);
    }

    Ok(records)
}

/// Load records from a CSV file
pub fn load_records<P: AsRef<Path>>(path: P, origin: RateOrigin) -> Result<Vec<InflationRecord>, DataError> {
    let file = File::open(path.as_ref())?;
    let records = load_records_from_reader(file, origin)?;
    info!("Loaded {} {:?} records from {}", records.len(), origin, path.as_ref().display());
    Ok(records)
}

/// Load the forecast table and, when present, the realized table from a data directory.
///
/// Without a forecast table the raw survey results are expanded instead.
pub fn load_from(dir: &Path) -> Result<Vec<InflationRecord>, DataError> {
    let mut records = Vec::new();

    let realized = dir.join(REALIZED_FILE);
    if realized.exists() {
        records.extend(load_records(&realized, RateOrigin::Realized)?);
    } else {
        debug!("No realized index table at {}", realized.display());
    }

    let forecast = dir.join(FORECAST_FILE);
    let survey_path = dir.join(SURVEY_FILE);
    if !forecast.exists() && survey_path.exists() {
        let rows = survey::load_survey_from_reader(File::open(&survey_path)?)?;
        let expanded = survey::expand_survey(&rows);
        info!("Expanded {} survey rows from {} into {} months", rows.len(), survey_path.display(), expanded.len());
        records.extend(expanded);
    } else {
        records.extend(load_records(forecast, RateOrigin::Forecast)?);
    }

    Ok(records)
}

/// Load all inflation records from the default data directory
pub fn load_default() -> Result<Vec<InflationRecord>, DataError> {
    load_from(Path::new(DEFAULT_DATA_PATH))
}
