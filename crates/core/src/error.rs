//! Error types for the IPO bid analysis system.

use crate::types::Variant;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the IPO bid analysis system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data integrity error (malformed or inconsistent records).
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Supply limit that cannot produce a clearing price.
    #[error("Invalid supply for {variant}: {supply} (must be positive)")]
    InvalidSupply {
        /// Variant carrying the bad supply value.
        variant: Variant,
        /// The offending supply limit.
        supply: i64,
    },

    /// Insufficient data for computation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data integrity error.
    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Error::DataIntegrity(msg.into())
    }

    /// Create an invalid supply error.
    pub fn invalid_supply(variant: Variant, supply: i64) -> Self {
        Error::InvalidSupply { variant, supply }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    /// Whether this error is a data integrity failure.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Error::DataIntegrity(_))
    }
}
