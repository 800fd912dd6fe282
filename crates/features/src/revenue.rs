//! Revenue projection under a hypothetical supply change.
//!
//! Constant-price model: observed revenue is scaled linearly by
//! (1 + supply_change). Clearing prices are not recomputed.

use ipo_core::{Bid, RevenueProjection};

/// Project revenue for a fractional supply change (0.10 = +10%).
pub fn project_revenue(bids: &[Bid], supply_change: f64) -> RevenueProjection {
    let initial_revenue: f64 = bids.iter().map(|b| b.amount).sum();

    RevenueProjection {
        supply_change,
        initial_revenue,
        adjusted_revenue: initial_revenue * (1.0 + supply_change),
    }
}

/// Project revenue for several scenarios, in the given order.
pub fn project_scenarios(bids: &[Bid], supply_changes: &[f64]) -> Vec<RevenueProjection> {
    supply_changes
        .iter()
        .map(|&change| project_revenue(bids, change))
        .collect()
}
