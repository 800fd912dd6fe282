//! Ranked demand curves for demand-vs-supply charts.

use crate::clearing::{rank_bids, ClearingPriceEngine};
use ipo_core::{Bid, DemandCurve, Error, RankedBid, Result, Variant};

/// Build the demand curve for one variant.
///
/// Points are ranked the same way the clearing engine ranks them, so the
/// point at rank `supply_limit` (or the last point) carries the clearing
/// price.
pub fn demand_curve(bids: &[Bid], variant: &Variant) -> Result<DemandCurve> {
    let group: Vec<&Bid> = bids.iter().filter(|b| b.is_variant(variant)).collect();
    if group.is_empty() {
        return Err(Error::insufficient_data(format!("no bids for variant {}", variant)));
    }

    let result = ClearingPriceEngine::new().clear_variant(variant, &group)?;
    let points = rank_bids(&group)
        .into_iter()
        .enumerate()
        .map(|(idx, bid)| RankedBid {
            rank: idx + 1,
            amount: bid.amount,
        })
        .collect();

    Ok(DemandCurve {
        variant: variant.clone(),
        supply_limit: result.supply_limit,
        clearing_price: result.clearing_price,
        points,
    })
}
