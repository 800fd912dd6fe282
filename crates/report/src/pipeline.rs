//! Analysis pipeline.
//!
//! Runs one pass over a static dataset: records are filtered once, then the
//! filtered bids feed every analysis independently. Only a data integrity
//! failure at the filter aborts a run; clearing failures are isolated per
//! variant and reported alongside the successful results.

use chrono::{DateTime, Utc};
use ipo_core::{
    AmountSummary, Bid, ClearingResult, Config, DemandCurve, Result, RevenueProjection, ShoeSize,
    Variant,
};
use ipo_features::{
    average_by, count_matrix, demand_curve, describe, revenue::project_scenarios,
    ClearingPriceEngine, CountMatrix, Dimension, GroupAverage, IqrFence, OutlierDetector,
};
use ipo_ingestion::{FilterStats, RawBidRecord, RecordFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A variant that could not be cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantFailure {
    /// Variant that failed.
    pub variant: Variant,
    /// Why it failed.
    pub reason: String,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Configuration the run used.
    pub config: Config,
    /// Filtering statistics.
    pub filter: FilterStats,
    /// Amount summary (`None` when no bids survived filtering).
    pub summary: Option<AmountSummary>,
    /// Clearing prices, sorted by variant.
    pub clearing: Vec<ClearingResult>,
    /// Variants that failed to clear.
    pub clearing_failures: Vec<VariantFailure>,
    /// Dense bid-count grid.
    pub count_matrix: CountMatrix,
    /// Mean amount per product type.
    pub average_by_product_type: Vec<GroupAverage>,
    /// Mean amount per shoe size.
    pub average_by_shoe_size: Vec<GroupAverage>,
    /// IQR fence used for outliers.
    pub outlier_fence: Option<IqrFence>,
    /// Outlying bids, in input order.
    pub outliers: Vec<Bid>,
    /// Revenue scenarios, in configured order.
    pub revenue: Vec<RevenueProjection>,
    /// Demand curves for the configured chart variants.
    pub demand_curves: Vec<DemandCurve>,
}

impl AnalysisReport {
    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether any bids survived filtering.
    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }
}

/// Configured analysis pipeline.
pub struct AnalysisPipeline {
    config: Config,
    filter: RecordFilter,
    engine: ClearingPriceEngine,
    outlier_detector: OutlierDetector,
}

impl AnalysisPipeline {
    /// Create a new pipeline. Fails if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            filter: RecordFilter::from_config(&config.filter),
            engine: ClearingPriceEngine::new(),
            outlier_detector: OutlierDetector::new(&config.outliers),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Filter raw records and analyze the survivors.
    pub fn run(&self, records: &[RawBidRecord]) -> Result<AnalysisReport> {
        info!(records = records.len(), "Starting analysis run");
        let filtered = self.filter.filter(records)?;
        let report = self.analyze(&filtered.bids, filtered.stats);
        info!(
            bids = report.filter.retained,
            variants = report.clearing.len(),
            failures = report.clearing_failures.len(),
            outliers = report.outliers.len(),
            "Analysis run complete"
        );
        Ok(report)
    }

    /// Analyze an already filtered bid set.
    pub fn analyze(&self, bids: &[Bid], filter: FilterStats) -> AnalysisReport {
        let clearing = self.engine.compute(bids);
        debug!(
            variants = clearing.variant_count(),
            cleared = clearing.results.len(),
            complete = clearing.is_complete(),
            "Computed clearing prices"
        );

        let clearing_failures = clearing
            .failures
            .iter()
            .map(|(variant, err)| VariantFailure {
                variant: variant.clone(),
                reason: err.to_string(),
            })
            .collect();

        AnalysisReport {
            generated_at: Utc::now(),
            config: self.config.clone(),
            filter,
            summary: describe(bids),
            clearing: clearing.results,
            clearing_failures,
            count_matrix: count_matrix(bids),
            average_by_product_type: average_by(bids, Dimension::ProductType),
            average_by_shoe_size: average_by(bids, Dimension::ShoeSize),
            outlier_fence: self.outlier_detector.fence(bids),
            outliers: self.outlier_detector.detect(bids),
            revenue: project_scenarios(bids, &self.config.projection.supply_changes),
            demand_curves: self.demand_curves(bids),
        }
    }

    fn demand_curves(&self, bids: &[Bid]) -> Vec<DemandCurve> {
        self.config
            .report
            .chart_variants
            .iter()
            .filter_map(|cv| {
                let variant = Variant::new(cv.product_type.clone(), ShoeSize::new(cv.shoe_size));
                match demand_curve(bids, &variant) {
                    Ok(curve) => Some(curve),
                    Err(err) => {
                        warn!(variant = %variant, error = %err, "Skipping demand curve");
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ipo_ingestion::load_records_from_str;

    const DATASET: &str = r#"{"bids": [
        {"action": "IPO bid", "amount": 400, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "IPO bid", "amount": 300, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "IPO bid", "amount": 340, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "IPO bid", "amount": 250, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "IPO bid", "amount": 200, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "IPO bid", "amount": 320, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "ask",     "amount": 500, "product_type": "black", "shoe_size": 10, "ipo_supply": 3},
        {"action": "IPO bid", "amount": 280, "product_type": "red",   "shoe_size": 10, "ipo_supply": 5},
        {"action": "IPO bid", "amount": 260, "product_type": "red",   "shoe_size": 10, "ipo_supply": 5},
        {"action": "IPO bid", "amount": 20,  "product_type": "red",   "shoe_size": 9.5, "ipo_supply": 2},
        {"action": "IPO bid", "amount": 310, "product_type": "red",   "shoe_size": 9.5, "ipo_supply": 2}
    ]}"#;

    fn run(config: Config) -> AnalysisReport {
        let records = load_records_from_str(DATASET).unwrap();
        AnalysisPipeline::new(config).unwrap().run(&records).unwrap()
    }

    #[test]
    fn test_end_to_end() {
        let report = run(Config::default());

        // 400 is above the ceiling, the ask is the wrong action
        assert_eq!(report.filter.total_records, 11);
        assert_eq!(report.filter.wrong_action, 1);
        assert_eq!(report.filter.above_ceiling, 1);
        assert_eq!(report.filter.retained, 9);

        let summary = report.summary.as_ref().unwrap();
        assert_eq!(summary.count, 9);
        assert_relative_eq!(summary.max, 340.0);
        assert_relative_eq!(summary.min, 20.0);
        assert_relative_eq!(summary.median, 280.0);

        assert!(report.clearing_failures.is_empty());
        let prices: Vec<(String, f64)> = report
            .clearing
            .iter()
            .map(|r| (r.variant.to_string(), r.clearing_price))
            .collect();
        assert_eq!(
            prices,
            vec![
                ("black/10".to_string(), 300.0),
                ("red/9.5".to_string(), 20.0),
                ("red/10".to_string(), 260.0),
            ]
        );

        assert_eq!(report.count_matrix.get("red", ShoeSize::new(9.5)), Some(2));
        assert_eq!(report.count_matrix.get("black", ShoeSize::new(9.5)), Some(0));

        let outliers: Vec<f64> = report.outliers.iter().map(|b| b.amount).collect();
        assert_eq!(outliers, vec![20.0]);

        assert_eq!(report.revenue.len(), 2);
        assert_relative_eq!(report.revenue[0].initial_revenue, 2280.0);
        assert_relative_eq!(report.revenue[0].adjusted_revenue, 2508.0, epsilon = 1e-9);

        assert_eq!(report.demand_curves.len(), 2);
        assert_eq!(report.demand_curves[0].points.len(), 5);
    }

    #[test]
    fn test_failure_isolated_per_variant() {
        let records = load_records_from_str(
            r#"[
                {"action": "IPO bid", "amount": 100, "product_type": "black", "shoe_size": 10, "ipo_supply": 1},
                {"action": "IPO bid", "amount": 110, "product_type": "black", "shoe_size": 10, "ipo_supply": 2},
                {"action": "IPO bid", "amount": 120, "product_type": "red", "shoe_size": 10, "ipo_supply": 1}
            ]"#,
        )
        .unwrap();
        let report = AnalysisPipeline::new(Config::default())
            .unwrap()
            .run(&records)
            .unwrap();

        assert_eq!(report.clearing.len(), 1);
        assert_eq!(report.clearing_failures.len(), 1);
        assert_eq!(report.clearing_failures[0].variant.product_type, "black");
        assert!(report.clearing_failures[0].reason.contains("inconsistent supply"));
        // The black chart is skipped, red still renders
        assert_eq!(report.demand_curves.len(), 1);
    }

    #[test]
    fn test_malformed_record_aborts_run() {
        let records = load_records_from_str(
            r#"[{"action": "IPO bid", "amount": "lots", "product_type": "black", "shoe_size": 10, "ipo_supply": 1}]"#,
        )
        .unwrap();
        let err = AnalysisPipeline::new(Config::default())
            .unwrap()
            .run(&records)
            .unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_empty_dataset() {
        let report = AnalysisPipeline::new(Config::default())
            .unwrap()
            .run(&[])
            .unwrap();

        assert!(!report.has_data());
        assert!(report.clearing.is_empty());
        assert!(report.outliers.is_empty());
        assert!(report.outlier_fence.is_none());
        assert!(report.count_matrix.is_empty());
        assert!(report.demand_curves.is_empty());
        assert_eq!(report.revenue[0].initial_revenue, 0.0);
    }

    #[test]
    fn test_custom_config() {
        let mut config = Config::default();
        config.filter.max_amount = 1000.0;
        config.projection.supply_changes = vec![0.0];
        config.report.chart_variants.clear();
        let report = run(config);

        assert_eq!(report.filter.retained, 10);
        assert_eq!(report.revenue.len(), 1);
        assert_eq!(report.revenue[0].adjusted_revenue, report.revenue[0].initial_revenue);
        assert!(report.demand_curves.is_empty());
        // 400 now clears black/10 at the third-highest bid
        assert_eq!(report.clearing[0].clearing_price, 320.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.filter.max_amount = 0.0;
        assert!(AnalysisPipeline::new(config).is_err());
    }

    #[test]
    fn test_report_json() {
        let report = run(Config::default());
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["clearing"][0]["clearing_price"], serde_json::json!(300.0));
        assert_eq!(value["clearing"][0]["variant"]["shoe_size"], serde_json::json!(10.0));
    }
}
