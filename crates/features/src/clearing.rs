//! Uniform-price clearing per variant.
//!
//! Bids for a (product type, shoe size) variant are ranked by amount, highest
//! first. With supply limit S, the S-th highest bid sets the price every
//! winner pays. When fewer than S bids exist, every bid clears and the price
//! floors at the lowest one.

use ipo_core::{Bid, ClearingResult, Error, Result, Variant};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Clearing output for a whole bid set.
#[derive(Debug, Default)]
pub struct ClearingReport {
    /// One result per successfully cleared variant, sorted by variant.
    pub results: Vec<ClearingResult>,
    /// Variants that could not be cleared, sorted by variant.
    pub failures: Vec<(Variant, Error)>,
}

impl ClearingReport {
    /// Look up the result for a variant.
    pub fn get(&self, variant: &Variant) -> Option<&ClearingResult> {
        self.results
            .binary_search_by(|r| r.variant.cmp(variant))
            .ok()
            .map(|idx| &self.results[idx])
    }

    /// Whether every variant cleared.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of variants seen (cleared or failed).
    pub fn variant_count(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Stateless clearing engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearingPriceEngine;

impl ClearingPriceEngine {
    /// Create a new clearing engine.
    pub fn new() -> Self {
        Self
    }

    /// Group bids by variant. Input order is preserved within each group.
    pub fn partition<'a>(&self, bids: &'a [Bid]) -> BTreeMap<Variant, Vec<&'a Bid>> {
        let mut groups: BTreeMap<Variant, Vec<&'a Bid>> = BTreeMap::new();
        for bid in bids {
            groups.entry(bid.variant()).or_default().push(bid);
        }
        groups
    }

    /// Compute one clearing price per variant.
    ///
    /// A variant with bad supply data fails on its own; the rest still clear.
    pub fn compute(&self, bids: &[Bid]) -> ClearingReport {
        let mut report = ClearingReport::default();

        for (variant, group) in self.partition(bids) {
            match self.clear_variant(&variant, &group) {
                Ok(result) => {
                    debug!(
                        variant = %variant,
                        price = result.clearing_price,
                        bids = result.bid_count,
                        supply = result.supply_limit,
                        "Cleared variant"
                    );
                    report.results.push(result);
                }
                Err(err) => {
                    warn!(variant = %variant, error = %err, "Variant failed to clear");
                    report.failures.push((variant, err));
                }
            }
        }

        report
    }

    /// Clear a single variant's bids.
    pub fn clear_variant(&self, variant: &Variant, bids: &[&Bid]) -> Result<ClearingResult> {
        let supply = supply_limit(variant, bids)?;
        let ranked = rank_bids(bids);
        let bid_count = ranked.len();

        // Rank S is 1-indexed; when demand falls short, the last bid sets the price.
        let price_idx = if bid_count as u64 >= supply {
            (supply - 1) as usize
        } else {
            bid_count - 1
        };

        Ok(ClearingResult {
            variant: variant.clone(),
            clearing_price: ranked[price_idx].amount,
            supply_limit: supply,
            bid_count,
            allocated: price_idx + 1,
            supply_exhausted: bid_count as u64 >= supply,
        })
    }
}

/// Compute clearing prices with the default engine.
pub fn compute_clearing_prices(bids: &[Bid]) -> ClearingReport {
    ClearingPriceEngine::new().compute(bids)
}

/// Sort bids by amount, highest first. Equal amounts keep input order.
pub fn rank_bids<'a>(bids: &[&'a Bid]) -> Vec<&'a Bid> {
    let mut ranked = bids.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    ranked
}

/// Read the single supply limit shared by a variant's bids.
pub fn supply_limit(variant: &Variant, bids: &[&Bid]) -> Result<u64> {
    let first = bids.first().ok_or_else(|| {
        Error::insufficient_data(format!("no bids for variant {}", variant))
    })?;

    let supply = first.ipo_supply;
    if let Some(other) = bids.iter().find(|b| b.ipo_supply != supply) {
        return Err(Error::data_integrity(format!(
            "variant {} has inconsistent supply limits ({} and {})",
            variant, supply, other.ipo_supply
        )));
    }

    if supply <= 0 {
        return Err(Error::invalid_supply(variant.clone(), supply));
    }

    Ok(supply as u64)
}
