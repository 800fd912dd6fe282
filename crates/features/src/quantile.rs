//! Quantiles by linear interpolation between order statistics.
//!
//! For sorted values x[0..n] and probability p, the quantile sits at
//! position h = (n - 1) * p and interpolates between x[floor(h)] and
//! x[floor(h) + 1]. This is the convention of most tabular-data libraries
//! (Hyndman & Fan type 7); statrs' `OrderStatistics::quantile` uses type 8,
//! so it is not used here.

/// Sort a copy of the values ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile of already-sorted values. Returns `None` for empty input.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;

    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// First and third quartiles of already-sorted values.
pub fn quartiles_sorted(sorted: &[f64]) -> Option<(f64, f64)> {
    Some((quantile_sorted(sorted, 0.25)?, quantile_sorted(sorted, 0.75)?))
}
