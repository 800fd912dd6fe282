//! Record filtering by action and bid-amount ceiling.
//!
//! The filter is the data integrity boundary: a record whose action is
//! missing, or whose retained columns are malformed, fails the whole
//! filtering pass rather than being dropped or coerced.

use crate::record::RawBidRecord;
use ipo_core::{config::FilterConfig, Bid, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counts describing one filtering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Records examined.
    pub total_records: usize,
    /// Records whose action did not match.
    pub wrong_action: usize,
    /// Records with the right action but an amount above the ceiling.
    pub above_ceiling: usize,
    /// Records retained.
    pub retained: usize,
}

impl FilterStats {
    /// Fraction of records retained.
    pub fn retained_frac(&self) -> f64 {
        if self.total_records > 0 {
            self.retained as f64 / self.total_records as f64
        } else {
            0.0
        }
    }
}

/// Output of a filtering pass.
#[derive(Debug, Clone, Default)]
pub struct FilteredBids {
    /// Retained bids, in input order.
    pub bids: Vec<Bid>,
    /// Pass statistics.
    pub stats: FilterStats,
}

/// Restricts bid records to the configured action and amount ceiling.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    action: String,
    max_amount: f64,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl RecordFilter {
    /// Create a new record filter.
    pub fn new(action: impl Into<String>, max_amount: f64) -> Result<Self> {
        let action = action.into();
        if action.is_empty() {
            return Err(Error::config("filter action must not be empty"));
        }
        if !max_amount.is_finite() || max_amount <= 0.0 {
            return Err(Error::config(format!(
                "filter max_amount must be a positive number, got {}",
                max_amount
            )));
        }
        Ok(Self { action, max_amount })
    }

    /// Create from an already validated configuration section.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            action: config.action.clone(),
            max_amount: config.max_amount,
        }
    }

    /// Action retained by this filter.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Inclusive amount ceiling.
    pub fn max_amount(&self) -> f64 {
        self.max_amount
    }

    /// Validate and filter raw records.
    ///
    /// Returns an empty set (not an error) when nothing matches.
    pub fn filter(&self, records: &[RawBidRecord]) -> Result<FilteredBids> {
        let mut stats = FilterStats {
            total_records: records.len(),
            ..FilterStats::default()
        };
        let mut bids = Vec::new();

        for (row, record) in records.iter().enumerate() {
            // Exact, case-sensitive match
            if record.action(row)? != self.action {
                stats.wrong_action += 1;
                continue;
            }

            // Rows above the ceiling are dropped before their other columns are read
            if record.amount(row)? > self.max_amount {
                stats.above_ceiling += 1;
                continue;
            }

            bids.push(record.to_bid(row)?);
        }

        stats.retained = bids.len();
        debug!(
            total = stats.total_records,
            wrong_action = stats.wrong_action,
            above_ceiling = stats.above_ceiling,
            retained = stats.retained,
            "Filtered bid records"
        );

        Ok(FilteredBids { bids, stats })
    }

    /// Filter already-typed bids.
    pub fn filter_bids(&self, bids: &[Bid]) -> Vec<Bid> {
        bids.iter()
            .filter(|b| self.accepts(b))
            .cloned()
            .collect()
    }

    /// Check whether a typed bid passes the filter.
    #[inline]
    pub fn accepts(&self, bid: &Bid) -> bool {
        bid.action == self.action && bid.amount <= self.max_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipo_core::ShoeSize;
    use serde_json::{json, Value};

    fn ipo(amount: f64) -> RawBidRecord {
        RawBidRecord::new("IPO bid", amount, "black", 10.0, 3)
    }

    #[test]
    fn test_filters_action_and_ceiling() {
        let records = vec![
            ipo(300.0),
            RawBidRecord::new("ask", 200.0, "black", 10.0, 3),
            ipo(351.0),
            ipo(350.0), // inclusive bound
            RawBidRecord::new("ipo bid", 100.0, "black", 10.0, 3), // case differs
        ];

        let out = RecordFilter::default().filter(&records).unwrap();

        let amounts: Vec<f64> = out.bids.iter().map(|b| b.amount).collect();
        assert_eq!(amounts, vec![300.0, 350.0]);
        assert_eq!(out.stats.total_records, 5);
        assert_eq!(out.stats.wrong_action, 2);
        assert_eq!(out.stats.above_ceiling, 1);
        assert_eq!(out.stats.retained, 2);
    }

    #[test]
    fn test_preserves_input_order() {
        let records = vec![ipo(100.0), ipo(300.0), ipo(200.0)];
        let out = RecordFilter::default().filter(&records).unwrap();
        let amounts: Vec<f64> = out.bids.iter().map(|b| b.amount).collect();
        assert_eq!(amounts, vec![100.0, 300.0, 200.0]);
    }

    #[test]
    fn test_empty_result_is_not_error() {
        let records = vec![ipo(500.0), ipo(400.0)];
        let out = RecordFilter::default().filter(&records).unwrap();
        assert!(out.bids.is_empty());
        assert_eq!(out.stats.retained_frac(), 0.0);
    }

    #[test]
    fn test_null_action_fails() {
        let mut bad = ipo(100.0);
        bad.action = Value::Null;
        let err = RecordFilter::default().filter(&[ipo(100.0), bad]).unwrap_err();
        assert!(err.is_data_integrity());
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_non_numeric_amount_fails() {
        let mut bad = ipo(100.0);
        bad.amount = json!("one hundred");
        let err = RecordFilter::default().filter(&[bad]).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_other_actions_not_inspected() {
        let other: RawBidRecord = serde_json::from_value(json!({
            "action": "sale",
            "amount": "n/a"
        }))
        .unwrap();
        let out = RecordFilter::default().filter(&[other, ipo(120.0)]).unwrap();
        assert_eq!(out.bids.len(), 1);
    }

    #[test]
    fn test_above_ceiling_row_not_inspected() {
        let mut dropped = ipo(900.0);
        dropped.shoe_size = json!("XL");
        dropped.ipo_supply = Value::Null;
        let out = RecordFilter::default().filter(&[ipo(300.0), dropped]).unwrap();
        assert_eq!(out.bids.len(), 1);
        assert_eq!(out.stats.above_ceiling, 1);
    }

    #[test]
    fn test_retained_row_with_bad_size_fails() {
        let mut bad = ipo(300.0);
        bad.shoe_size = json!("XL");
        let err = RecordFilter::default().filter(&[bad]).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_custom_filter() {
        let filter = RecordFilter::new("IPO bid", 1000.0).unwrap();
        let out = filter.filter(&[ipo(500.0)]).unwrap();
        assert_eq!(out.bids.len(), 1);
        assert!(RecordFilter::new("", 100.0).is_err());
        assert!(RecordFilter::new("IPO bid", f64::NAN).is_err());
    }

    #[test]
    fn test_filter_typed_bids() {
        let bids = vec![
            Bid {
                action: "IPO bid".to_string(),
                amount: 200.0,
                product_type: "red".to_string(),
                shoe_size: ShoeSize::new(9.0),
                ipo_supply: 2,
            },
            Bid {
                action: "IPO bid".to_string(),
                amount: 400.0,
                product_type: "red".to_string(),
                shoe_size: ShoeSize::new(9.0),
                ipo_supply: 2,
            },
        ];
        let kept = RecordFilter::default().filter_bids(&bids);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].amount, 200.0);
    }
}
