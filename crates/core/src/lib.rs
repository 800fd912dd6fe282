//! Core types and configuration for the IPO bid analysis system.
//!
//! This crate provides shared types used across all other crates:
//! - Bid data types (bids, variants, shoe sizes)
//! - Clearing results
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
