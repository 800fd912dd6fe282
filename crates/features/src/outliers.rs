//! Interquartile-range outlier detection.

use crate::quantile::{quartiles_sorted, sorted};
use ipo_core::{config::OutlierConfig, Bid};
use serde::{Deserialize, Serialize};

/// Fence outside of which an amount is an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrFence {
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
    /// Lower fence (q1 - k * IQR).
    pub lower: f64,
    /// Upper fence (q3 + k * IQR).
    pub upper: f64,
}

impl IqrFence {
    /// Interquartile range.
    #[inline]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whether an amount falls strictly outside the fence.
    #[inline]
    pub fn is_outlier(&self, amount: f64) -> bool {
        amount < self.lower || amount > self.upper
    }
}

/// IQR outlier detector.
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    multiplier: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new(&OutlierConfig::default())
    }
}

impl OutlierDetector {
    /// Create a new outlier detector.
    pub fn new(config: &OutlierConfig) -> Self {
        Self {
            multiplier: config.iqr_multiplier,
        }
    }

    /// Compute the fence over all bid amounts. `None` for empty input.
    pub fn fence(&self, bids: &[Bid]) -> Option<IqrFence> {
        let amounts: Vec<f64> = bids.iter().map(|b| b.amount).collect();
        let (q1, q3) = quartiles_sorted(&sorted(&amounts))?;
        let iqr = q3 - q1;

        Some(IqrFence {
            q1,
            q3,
            lower: q1 - self.multiplier * iqr,
            upper: q3 + self.multiplier * iqr,
        })
    }

    /// Bids outside the fence, in input order.
    pub fn detect(&self, bids: &[Bid]) -> Vec<Bid> {
        match self.fence(bids) {
            Some(fence) => bids
                .iter()
                .filter(|b| fence.is_outlier(b.amount))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Detect outliers with the standard 1.5 x IQR fence.
pub fn detect_outliers(bids: &[Bid]) -> Vec<Bid> {
    OutlierDetector::default().detect(bids)
}
