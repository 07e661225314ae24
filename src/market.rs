//! Market snapshot: spot exchange rate and current index unit value
//!
//! Refreshed externally and stored as JSON in `data/market/market_status.json`.

use crate::error::DataError;
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Market snapshot file, relative to the data directory
pub const MARKET_FILE: &str = "market/market_status.json";

/// Latest published market values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub last_update: Option<NaiveDateTime>,
    /// Official selling exchange rate (currency per dollar)
    #[serde(default)]
    pub dolar_oficial: Option<f64>,
    /// Currency value of one UVA
    #[serde(default)]
    pub uva_value: Option<f64>,
    /// Publication date of `uva_value`, `YYYY-MM-DD`
    #[serde(default)]
    pub uva_date: String,
}

impl MarketSnapshot {
    /// Spot exchange rate, if one was captured
    pub fn fx_rate(&self) -> Option<f64> {
        self.dolar_oficial.filter(|v| *v > 0.0)
    }

    /// Current index unit value, if one was captured
    pub fn index_unit_value(&self) -> Option<f64> {
        self.uva_value.filter(|v| *v > 0.0)
    }

    pub fn uva_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.uva_date.trim(), "%Y-%m-%d").ok()
    }

    /// Load a snapshot from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let snapshot: MarketSnapshot = serde_json::from_reader(reader)?;
        if snapshot.index_unit_value().is_none() {
            warn!("Market snapshot has no index unit value");
        }
        Ok(snapshot)
    }

    /// Load the snapshot stored in a data directory
    pub fn load_from(dir: &Path) -> Result<Self, DataError> {
        let path = dir.join(MARKET_FILE);
        let snapshot = Self::from_reader(File::open(&path)?)?;
        info!(
            "Market snapshot from {}: fx {:?}, index unit {:?} ({})",
            path.display(),
            snapshot.dolar_oficial,
            snapshot.uva_value,
            snapshot.uva_date
        );
        Ok(snapshot)
    }
}
