//! Error types for timeline construction, engine entry and data loading

use thiserror::Error;

/// Invalid or incomplete simulation setup.
///
/// Raised synchronously when a timeline is built or an engine is entered.
/// Degenerate inputs (zero principal, zero term) are not errors: they produce
/// an empty schedule instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Fixed fallback mode was selected without a rate
    #[error("fixed fallback mode requires a fallback rate")]
    MissingFallbackValue,

    /// Rental adjustment cadence must be at least one month
    #[error("adjustment cadence must be a positive number of months, got {0}")]
    InvalidCadence(u32),

    /// In-progress contract reports more elapsed months than one cadence
    #[error("{elapsed} months elapsed since last adjustment, cadence is {cadence}")]
    ElapsedExceedsCadence { elapsed: u32, cadence: u32 },

    /// Term or duration beyond the supported horizon
    #[error("{requested} periods requested, at most {max} are supported")]
    TooManyPeriods { requested: u32, max: u32 },

    /// Index unit value must be a positive currency amount
    #[error("index unit value must be positive, got {0}")]
    InvalidIndexValue(f64),

    /// A rate that cannot be negative was negative
    #[error("{name} cannot be negative, got {value}")]
    NegativeRate { name: &'static str, value: f64 },

    /// Monthly inflation at or below -100% would zero out the index
    #[error("monthly inflation rate {rate} for {month:02}/{year} is not above -100%")]
    InvalidInflationRate { month: u32, year: i32, rate: f64 },

    /// Fallback or manual inflation at or below -100%
    #[error("inflation rate {0} is not above -100%")]
    InvalidFallbackRate(f64),

    /// A currency amount that cannot be negative was negative
    #[error("{name} cannot be negative, got {value}")]
    NegativeAmount { name: &'static str, value: f64 },

    /// An amount or rate is NaN or infinite
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// Start period with a month outside 1-12
    #[error("start period month must be 1-12, got {month} in {year}")]
    InvalidStartPeriod { month: u32, year: i32 },
}

/// Failure while reading market or forecast data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field could not be interpreted
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// Failure while preparing a simulation from data files
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Shorthand for engine results
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
