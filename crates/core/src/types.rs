//! Core data types for the IPO bid analysis system.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action string identifying in-scope records.
pub const IPO_BID_ACTION: &str = "IPO bid";

/// Bid amount in currency units.
pub type Amount = f64;

/// Shoe size with total ordering.
///
/// Sizes are ordinal (9.5 < 10 < 10.5), so they are held as ordered floats
/// rather than free-form labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoeSize(pub OrderedFloat<f64>);

impl ShoeSize {
    /// Create a shoe size from a numeric value.
    #[inline]
    pub fn new(size: f64) -> Self {
        Self(OrderedFloat(size))
    }

    /// Get the raw numeric value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0.into_inner()
    }
}

impl fmt::Display for ShoeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value();
        if v.fract() == 0.0 {
            write!(f, "{}", v as i64)
        } else {
            write!(f, "{}", v)
        }
    }
}

/// A distinct auctioned good: (product type, shoe size).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Product type (e.g. colorway).
    pub product_type: String,
    /// Shoe size.
    pub shoe_size: ShoeSize,
}

impl Variant {
    /// Create a new variant key.
    pub fn new(product_type: impl Into<String>, shoe_size: ShoeSize) -> Self {
        Self {
            product_type: product_type.into(),
            shoe_size,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product_type, self.shoe_size)
    }
}

/// A validated bid record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Action kind (only "IPO bid" survives filtering by default).
    pub action: String,
    /// Bid amount.
    pub amount: Amount,
    /// Product type.
    pub product_type: String,
    /// Shoe size.
    pub shoe_size: ShoeSize,
    /// Supply limit for this bid's variant.
    ///
    /// Signed so that non-positive values survive loading and are rejected
    /// by the clearing engine with a typed error.
    pub ipo_supply: i64,
}

impl Bid {
    /// Get the variant key for this bid.
    pub fn variant(&self) -> Variant {
        Variant::new(self.product_type.clone(), self.shoe_size)
    }

    /// Check whether this bid belongs to a variant.
    #[inline]
    pub fn is_variant(&self, variant: &Variant) -> bool {
        self.product_type == variant.product_type && self.shoe_size == variant.shoe_size
    }
}

/// Clearing output for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearingResult {
    /// Variant cleared.
    pub variant: Variant,
    /// Uniform clearing price (always an observed bid amount).
    pub clearing_price: Amount,
    /// Supply limit of the variant.
    pub supply_limit: u64,
    /// Number of bids in the variant.
    pub bid_count: usize,
    /// Number of bids that win an allocation.
    pub allocated: usize,
    /// Whether demand reached the supply limit.
    pub supply_exhausted: bool,
}

impl ClearingResult {
    /// Units left unsold when demand falls short of supply.
    pub fn unsold_units(&self) -> u64 {
        self.supply_limit.saturating_sub(self.allocated as u64)
    }
}

/// One point on a demand curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedBid {
    /// 1-indexed rank (cumulative bid count).
    pub rank: usize,
    /// Bid amount at this rank.
    pub amount: Amount,
}

/// Ranked demand for a variant plus its supply line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCurve {
    /// Variant the curve describes.
    pub variant: Variant,
    /// Supply limit (vertical supply line at this rank).
    pub supply_limit: u64,
    /// Clearing price implied by the curve.
    pub clearing_price: Amount,
    /// Bids sorted by amount, highest first.
    pub points: Vec<RankedBid>,
}

/// Descriptive statistics over bid amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountSummary {
    /// Number of bids.
    pub count: usize,
    /// Mean amount.
    pub mean: f64,
    /// Sample standard deviation (undefined for fewer than two bids).
    pub std_dev: Option<f64>,
    /// Lowest amount.
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Highest amount.
    pub max: f64,
}

impl AmountSummary {
    /// Interquartile range.
    #[inline]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Revenue under a hypothetical supply change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjection {
    /// Fractional supply change (0.10 = +10%).
    pub supply_change: f64,
    /// Sum of observed bid amounts.
    pub initial_revenue: f64,
    /// Linearly scaled revenue.
    pub adjusted_revenue: f64,
}

impl RevenueProjection {
    /// Absolute revenue change.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.adjusted_revenue - self.initial_revenue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bid(product_type: &str, size: f64, amount: f64) -> Bid {
        Bid {
            action: IPO_BID_ACTION.to_string(),
            amount,
            product_type: product_type.to_string(),
            shoe_size: ShoeSize::new(size),
            ipo_supply: 3,
        }
    }

    #[test]
    fn test_shoe_size_display() {
        assert_eq!(ShoeSize::new(10.0).to_string(), "10");
        assert_eq!(ShoeSize::new(10.5).to_string(), "10.5");
    }

    #[test]
    fn test_variant_ordering() {
        let a = Variant::new("black", ShoeSize::new(10.5));
        let b = Variant::new("black", ShoeSize::new(11.0));
        let c = Variant::new("red", ShoeSize::new(9.0));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_bid_variant() {
        let bid = make_bid("black", 10.0, 300.0);
        let variant = bid.variant();
        assert_eq!(variant, Variant::new("black", ShoeSize::new(10.0)));
        assert!(bid.is_variant(&variant));
        assert!(!bid.is_variant(&Variant::new("red", ShoeSize::new(10.0))));
    }

    #[test]
    fn test_unsold_units() {
        let result = ClearingResult {
            variant: Variant::new("black", ShoeSize::new(10.0)),
            clearing_price: 200.0,
            supply_limit: 10,
            bid_count: 5,
            allocated: 5,
            supply_exhausted: false,
        };
        assert_eq!(result.unsold_units(), 5);
    }

    #[test]
    fn test_shoe_size_serializes_as_number() {
        let json = serde_json::to_string(&ShoeSize::new(9.5)).unwrap();
        assert_eq!(json, "9.5");
    }
}
