//! Analysis pipeline and reporting for the IPO bid analysis system.
//!
//! This crate provides:
//! - The explicit load -> filter -> analyze pipeline
//! - Serializable analysis reports (JSON for external charting tools)
//! - Console rendering, including text demand/supply charts

pub mod pipeline;
pub mod render;

pub use pipeline::{AnalysisPipeline, AnalysisReport, VariantFailure};
pub use render::{DemandChart, TextReport};
