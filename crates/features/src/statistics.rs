//! Descriptive statistics over bid amounts.
//!
//! Global summary, per-dimension averages, and the dense
//! product type x shoe size count grid.

use crate::quantile::{quantile_sorted, sorted};
use ipo_core::{AmountSummary, Bid, ShoeSize};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Summarize bid amounts.
///
/// Returns `None` when there is no data.
pub fn describe(bids: &[Bid]) -> Option<AmountSummary> {
    if bids.is_empty() {
        return None;
    }

    let amounts: Vec<f64> = bids.iter().map(|b| b.amount).collect();
    let ordered = sorted(&amounts);
    let count = ordered.len();

    let std_dev = if count >= 2 {
        Some(amounts.iter().std_dev())
    } else {
        None
    };

    Some(AmountSummary {
        count,
        mean: amounts.iter().mean(),
        std_dev,
        min: ordered[0],
        q1: quantile_sorted(&ordered, 0.25)?,
        median: quantile_sorted(&ordered, 0.5)?,
        q3: quantile_sorted(&ordered, 0.75)?,
        max: ordered[count - 1],
    })
}

/// Grouping dimension for averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    ProductType,
    ShoeSize,
}

/// Value of a grouping dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    ProductType(String),
    ShoeSize(ShoeSize),
}

impl GroupKey {
    fn of(bid: &Bid, dimension: Dimension) -> Self {
        match dimension {
            Dimension::ProductType => GroupKey::ProductType(bid.product_type.clone()),
            Dimension::ShoeSize => GroupKey::ShoeSize(bid.shoe_size),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::ProductType(p) => write!(f, "{}", p),
            GroupKey::ShoeSize(s) => write!(f, "{}", s),
        }
    }
}

/// Mean bid amount for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    /// Group value.
    pub key: GroupKey,
    /// Mean amount.
    pub mean: f64,
    /// Bids in the group.
    pub count: usize,
}

/// Mean amount per distinct value of a dimension, sorted by key.
///
/// Only observed values appear; there is no zero-filling.
pub fn average_by(bids: &[Bid], dimension: Dimension) -> Vec<GroupAverage> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for bid in bids {
        groups.entry(GroupKey::of(bid, dimension)).or_default().push(bid.amount);
    }

    groups
        .into_iter()
        .map(|(key, amounts)| GroupAverage {
            key,
            count: amounts.len(),
            mean: amounts.iter().mean(),
        })
        .collect()
}

/// Dense bid-count grid over every observed product type and shoe size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountMatrix {
    /// Row labels, sorted.
    pub product_types: Vec<String>,
    /// Column labels, sorted.
    pub shoe_sizes: Vec<ShoeSize>,
    /// `counts[row][col]`; combinations with no bids hold 0.
    pub counts: Vec<Vec<usize>>,
}

impl CountMatrix {
    /// Count for a cell. `None` if either label was never observed.
    pub fn get(&self, product_type: &str, shoe_size: ShoeSize) -> Option<usize> {
        let row = self.row_index(product_type)?;
        let col = self.shoe_sizes.binary_search(&shoe_size).ok()?;
        Some(self.counts[row][col])
    }

    /// Total bids for a product type.
    pub fn row_total(&self, product_type: &str) -> Option<usize> {
        let row = self.row_index(product_type)?;
        Some(self.counts[row].iter().sum())
    }

    /// Total bids for a shoe size.
    pub fn column_total(&self, shoe_size: ShoeSize) -> Option<usize> {
        let col = self.shoe_sizes.binary_search(&shoe_size).ok()?;
        Some(self.counts.iter().map(|row| row[col]).sum())
    }

    /// Total bids in the grid.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.product_types.is_empty()
    }

    fn row_index(&self, product_type: &str) -> Option<usize> {
        self.product_types
            .binary_search_by(|p| p.as_str().cmp(product_type))
            .ok()
    }
}

/// Cross-tabulate bid counts by product type and shoe size.
pub fn count_matrix(bids: &[Bid]) -> CountMatrix {
    let product_types: Vec<String> = bids
        .iter()
        .map(|b| b.product_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let shoe_sizes: Vec<ShoeSize> = bids
        .iter()
        .map(|b| b.shoe_size)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut matrix = CountMatrix {
        counts: vec![vec![0; shoe_sizes.len()]; product_types.len()],
        product_types,
        shoe_sizes,
    };

    for bid in bids {
        // Labels were collected from these same bids
        if let (Some(row), Ok(col)) = (
            matrix.row_index(&bid.product_type),
            matrix.shoe_sizes.binary_search(&bid.shoe_size),
        ) {
            matrix.counts[row][col] += 1;
        }
    }

    matrix
}
