//! Data ingestion and filtering for the IPO bid analysis system.
//!
//! This crate handles:
//! - Raw bid record loading (JSON row exports of the `bids` sheet)
//! - Field validation (malformed actions and amounts are rejected, never coerced)
//! - Record filtering by action and amount ceiling

pub mod filter;
pub mod loader;
pub mod record;

pub use filter::{FilterStats, FilteredBids, RecordFilter};
pub use loader::{load_records_from_path, load_records_from_str};
pub use record::RawBidRecord;
