//! # Token Dataset Loader
//!
//! Reads the collector's CSV export into a typed, in-memory [`TokenDataset`].
//! Columns are validated once, up front: a missing or mistyped column fails the
//! whole load instead of surfacing later in an analysis stage.
//!
//! The collector writes more columns than the reporter needs (contract
//! address, SOL-denominated amounts, metadata URI, creator wallet). Anything
//! outside [`REQUIRED_COLUMNS`] is ignored.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc, Weekday};
use log::{debug, info};
use serde::{Deserialize, Deserializer};

use crate::error::{AnalyticsError, Result};

pub const COLUMN_TIMESTAMP: &str = "Timestamp";
pub const COLUMN_NAME: &str = "Name";
pub const COLUMN_TICKER: &str = "Ticker";
pub const COLUMN_BUY_IN_USD: &str = "Initial Buy In (USD)";
pub const COLUMN_MARKET_CAP_USD: &str = "Initial Market Cap (USD)";

/// Header names that must be present, exact and case-sensitive
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COLUMN_TIMESTAMP,
    COLUMN_NAME,
    COLUMN_TICKER,
    COLUMN_BUY_IN_USD,
    COLUMN_MARKET_CAP_USD,
];

// Naive layouts are interpreted as UTC. `%.f` also matches a missing fraction.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Calendar features derived from a record's timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFeatures {
    /// Hour of day in UTC, 0-23
    pub hour: u32,
    pub day_of_week: Weekday,
}

/// One token launch row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenRecord {
    #[serde(rename = "Timestamp", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Initial Buy In (USD)")]
    pub initial_buy_in_usd: f64,
    #[serde(rename = "Initial Market Cap (USD)")]
    pub initial_market_cap_usd: f64,

    /// Set by time analysis
    #[serde(skip)]
    pub time_features: Option<TimeFeatures>,
    /// Set by pattern detection; stays `None` when the market cap is zero
    #[serde(skip)]
    pub buy_in_ratio: Option<f64>,
}

impl TokenRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        name: impl Into<String>,
        ticker: impl Into<String>,
        initial_buy_in_usd: f64,
        initial_market_cap_usd: f64,
    ) -> Self {
        Self {
            timestamp,
            name: name.into(),
            ticker: ticker.into(),
            initial_buy_in_usd,
            initial_market_cap_usd,
            time_features: None,
            buy_in_ratio: None,
        }
    }

    fn validate_amounts(&self) -> std::result::Result<(), String> {
        for (column, value) in [
            (COLUMN_BUY_IN_USD, self.initial_buy_in_usd),
            (COLUMN_MARKET_CAP_USD, self.initial_market_cap_usd),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "'{}' must be a non-negative number, got {}",
                    column, value
                ));
            }
        }
        Ok(())
    }
}

/// All loaded records, in file row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDataset {
    records: Vec<TokenRecord>,
}

impl TokenDataset {
    pub fn new(records: Vec<TokenRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TokenRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [TokenRecord] {
        &mut self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses a collector timestamp into UTC.
///
/// Accepts RFC 3339 (any offset, converted to UTC) and naive
/// `YYYY-MM-DD[T ]HH:MM:SS[.fff]`, which is taken to already be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Loads the dataset from a CSV file.
///
/// # Errors
///
/// * [`AnalyticsError::DatasetNotFound`] if `path` does not exist
/// * [`AnalyticsError::Open`] if it exists but cannot be opened
/// * [`AnalyticsError::Parse`], [`AnalyticsError::Record`] or [`AnalyticsError::Csv`]
///   if it cannot be parsed
pub fn load_dataset(path: impl AsRef<Path>) -> Result<TokenDataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalyticsError::DatasetNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalyticsError::Open {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!("Reading token records from {}", path.display());
    let dataset = load_dataset_from_reader(file)?;
    info!("Loaded {} token records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parses a dataset from any CSV source. The first line must be the header.
///
/// Field values are trimmed; header names are not, so they must match exactly.
pub fn load_dataset_from_reader<R: Read>(reader: R) -> Result<TokenDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(AnalyticsError::parse(
            None,
            format!("missing required column '{}'", missing),
        ));
    }

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<TokenRecord>().enumerate() {
        let row = index + 1;
        let record = result.map_err(|source| AnalyticsError::Record { row, source })?;
        record
            .validate_amounts()
            .map_err(|reason| AnalyticsError::parse(Some(row), reason))?;
        records.push(record);
    }

    Ok(TokenDataset::new(records))
}
