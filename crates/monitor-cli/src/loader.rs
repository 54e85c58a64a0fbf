//! CSV loading for per-item history and forecast segments.
//!
//! Input rows carry one month for one item. Months with an observed
//! `clean_qty` form the history; the remaining months contribute their
//! `best_model_forecast` to the forecast segment.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use diagnostic_facade::{DiagnosticError, Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of monthly rows expected per item.
pub const DEFAULT_EXPECTED_OBSERVATIONS: usize = 54;

/// Error type for loading operations.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Item '{0}' not found")]
    UnknownItem(String),

    #[error("Expected {expected} months of data for {item}, got {actual}")]
    ShapeValidation {
        item: String,
        expected: usize,
        actual: usize,
    },

    #[error("Item '{item}' has no forecast value for month {month}")]
    MissingForecast { item: String, month: String },

    #[error("Invalid {segment} segment for item '{item}': {source}")]
    InvalidSeries {
        item: String,
        segment: &'static str,
        #[source]
        source: DiagnosticError,
    },
}

/// Loader configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Rows required per item; 0 disables the check (default: 54).
    pub expected_observations: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            expected_observations: DEFAULT_EXPECTED_OBSERVATIONS,
        }
    }
}

/// One input row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub item_loc_id: String,
    #[serde(rename = "FORECAST_MONTH")]
    pub forecast_month: String,
    pub clean_qty: Option<f64>,
    pub best_model_forecast: Option<f64>,
}

/// Read all rows from a CSV source with a header line.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = reader
        .deserialize()
        .collect::<Result<Vec<Record>, csv::Error>>()?;
    debug!(rows = records.len(), "loaded records");
    Ok(records)
}

/// Read all rows from a CSV file.
pub fn load_path(path: &Path) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path)?;
    load_records(BufReader::new(file))
}

/// Distinct item ids in order of first appearance.
pub fn item_ids(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.item_loc_id.as_str()))
        .map(|r| r.item_loc_id.clone())
        .collect()
}

/// Split one item's rows into (historical, forecast) series.
pub fn item_segments(
    records: &[Record],
    item: &str,
    config: &LoaderConfig,
) -> Result<(Series, Series), LoadError> {
    let mut rows: Vec<&Record> = records.iter().filter(|r| r.item_loc_id == item).collect();
    if rows.is_empty() {
        return Err(LoadError::UnknownItem(item.to_string()));
    }
    if config.expected_observations > 0 && rows.len() != config.expected_observations {
        return Err(LoadError::ShapeValidation {
            item: item.to_string(),
            expected: config.expected_observations,
            actual: rows.len(),
        });
    }

    rows.sort_by(|a, b| a.forecast_month.cmp(&b.forecast_month));

    let mut historical = Vec::new();
    let mut forecast = Vec::new();
    for row in rows {
        match (row.clean_qty, row.best_model_forecast) {
            (Some(actual), _) => historical.push(actual),
            (None, Some(predicted)) => forecast.push(predicted),
            (None, None) => {
                return Err(LoadError::MissingForecast {
                    item: item.to_string(),
                    month: row.forecast_month.clone(),
                })
            }
        }
    }

    let to_series = |values: Vec<f64>, segment: &'static str| {
        Series::new(values).map_err(|source| LoadError::InvalidSeries {
            item: item.to_string(),
            segment,
            source,
        })
    };

    let historical = to_series(historical, "historical")?;
    let forecast = to_series(forecast, "forecast")?;
    debug!(
        item,
        historical = historical.len(),
        forecast = forecast.len(),
        "split item segments"
    );
    Ok((historical, forecast))
}
