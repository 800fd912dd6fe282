//! Bid analytics for the IPO bid analysis system.
//!
//! This crate handles:
//! - Uniform-price clearing per (product type, shoe size) variant
//! - Ranked demand curves for charting
//! - Linear-interpolation quantiles
//! - Descriptive statistics, grouped averages and the dense count grid
//! - IQR outlier detection
//! - Constant-price revenue projection

pub mod clearing;
pub mod demand;
pub mod outliers;
pub mod quantile;
pub mod revenue;
pub mod statistics;

pub use clearing::{compute_clearing_prices, ClearingPriceEngine, ClearingReport};
pub use demand::demand_curve;
pub use outliers::{detect_outliers, IqrFence, OutlierDetector};
pub use revenue::{project_revenue, project_scenarios};
pub use statistics::{average_by, count_matrix, describe, CountMatrix, Dimension, GroupAverage, GroupKey};
