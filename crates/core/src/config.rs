//! Configuration structures for the IPO bid analysis system.

use crate::error::{Error, Result};
use crate::types::IPO_BID_ACTION;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record filter configuration.
    pub filter: FilterConfig,
    /// Outlier detection configuration.
    pub outliers: OutlierConfig,
    /// Revenue projection configuration.
    pub projection: ProjectionConfig,
    /// Report configuration.
    pub report: ReportConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing sections take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        self.outliers.validate()?;
        self.projection.validate()?;
        Ok(())
    }
}

/// Record filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Action string to retain (exact, case-sensitive match).
    pub action: String,
    /// Inclusive ceiling on bid amount.
    pub max_amount: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            action: IPO_BID_ACTION.to_string(),
            max_amount: 350.0,
        }
    }
}

impl FilterConfig {
    fn validate(&self) -> Result<()> {
        if self.action.is_empty() {
            return Err(Error::config("filter.action must not be empty"));
        }
        if !self.max_amount.is_finite() || self.max_amount <= 0.0 {
            return Err(Error::config(format!(
                "filter.max_amount must be a positive number, got {}",
                self.max_amount
            )));
        }
        Ok(())
    }
}

/// Outlier detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// Fence width in multiples of the interquartile range.
    pub iqr_multiplier: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self { iqr_multiplier: 1.5 }
    }
}

impl OutlierConfig {
    fn validate(&self) -> Result<()> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(Error::config(format!(
                "outliers.iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}

/// Revenue projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Supply change scenarios as fractions (0.10 = +10%).
    pub supply_changes: Vec<f64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            supply_changes: vec![0.10, -0.10],
        }
    }
}

impl ProjectionConfig {
    fn validate(&self) -> Result<()> {
        for &change in &self.supply_changes {
            if !change.is_finite() || change < -1.0 {
                return Err(Error::config(format!(
                    "projection.supply_changes entries must be finite and >= -1.0, got {}",
                    change
                )));
            }
        }
        Ok(())
    }
}

/// A variant selected for demand/supply charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartVariant {
    /// Product type.
    pub product_type: String,
    /// Shoe size.
    pub shoe_size: f64,
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Variants to build demand curves for.
    pub chart_variants: Vec<ChartVariant>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_variants: vec![
                ChartVariant {
                    product_type: "black".to_string(),
                    shoe_size: 10.0,
                },
                ChartVariant {
                    product_type: "red".to_string(),
                    shoe_size: 10.0,
                },
            ],
        }
    }
}
