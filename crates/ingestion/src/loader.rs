//! Dataset loading.
//!
//! Accepts either a bare JSON array of row objects or a workbook-style
//! object whose `bids` key holds that array.

use crate::record::RawBidRecord;
use ipo_core::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    Rows(Vec<RawBidRecord>),
    Workbook { bids: Vec<RawBidRecord> },
}

/// Parse raw bid records from a JSON string.
pub fn load_records_from_str(json: &str) -> Result<Vec<RawBidRecord>> {
    // Syntax errors surface as Json; a well-formed document of the wrong shape is a data error
    let value: serde_json::Value = serde_json::from_str(json)?;
    let dataset: Dataset = serde_json::from_value(value).map_err(|e| {
        Error::data_integrity(format!(
            "expected a JSON array of bid rows or an object with a \"bids\" array: {}",
            e
        ))
    })?;

    let records = match dataset {
        Dataset::Rows(rows) => rows,
        Dataset::Workbook { bids } => bids,
    };

    debug!(rows = records.len(), "Loaded raw bid records");
    Ok(records)
}

/// Load raw bid records from a JSON file.
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<Vec<RawBidRecord>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = contents.len(), "Read dataset file");
    load_records_from_str(&contents)
}
