//! Console rendering of analysis reports.

use crate::pipeline::AnalysisReport;
use ipo_core::DemandCurve;
use ipo_features::GroupAverage;
use std::fmt;

/// Width of the longest bar in a demand chart.
const CHART_WIDTH: usize = 40;

/// Human-readable rendering of an [`AnalysisReport`].
pub struct TextReport<'a>(pub &'a AnalysisReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(
            f,
            "Records: {} read, {} retained ({} other actions, {} above {:.2})",
            report.filter.total_records,
            report.filter.retained,
            report.filter.wrong_action,
            report.filter.above_ceiling,
            report.config.filter.max_amount,
        )?;

        match &report.summary {
            Some(s) => {
                writeln!(f, "Total Bids: {}", s.count)?;
                writeln!(f, "Median Bid: {:.2}", s.median)?;
                writeln!(f, "Highest Bid: {:.2}", s.max)?;
                writeln!(f, "Lowest Bid: {:.2}", s.min)?;
                match s.std_dev {
                    Some(sd) => writeln!(f, "Mean Bid: {:.2} (std {:.2})", s.mean, sd)?,
                    None => writeln!(f, "Mean Bid: {:.2}", s.mean)?,
                }
                writeln!(f, "Quartiles: {:.2} / {:.2} / {:.2}", s.q1, s.median, s.q3)?;
            }
            None => writeln!(f, "Total Bids: 0 (no data)")?,
        }

        writeln!(f)?;
        writeln!(f, "Clearing prices:")?;
        if report.clearing.is_empty() && report.clearing_failures.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for r in &report.clearing {
            writeln!(
                f,
                "  {:<20} price {:>9.2}  supply {:>4}  bids {:>4}{}",
                r.variant.to_string(),
                r.clearing_price,
                r.supply_limit,
                r.bid_count,
                if r.supply_exhausted { "" } else { "  (supply not exhausted)" },
            )?;
        }
        for failure in &report.clearing_failures {
            writeln!(f, "  {:<20} FAILED: {}", failure.variant.to_string(), failure.reason)?;
        }

        writeln!(f)?;
        writeln!(f, "Total Bids by Color and Size:")?;
        let matrix = &report.count_matrix;
        if matrix.is_empty() {
            writeln!(f, "  (none)")?;
        } else {
            write!(f, "  {:<12}", "")?;
            for size in &matrix.shoe_sizes {
                write!(f, "{:>7}", size.to_string())?;
            }
            writeln!(f)?;
            for (product_type, row) in matrix.product_types.iter().zip(&matrix.counts) {
                write!(f, "  {:<12}", product_type)?;
                for count in row {
                    write!(f, "{:>7}", count)?;
                }
                writeln!(f)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Number of Outliers: {}", report.outliers.len())?;
        if let Some(fence) = &report.outlier_fence {
            writeln!(f, "  fence [{:.2}, {:.2}]", fence.lower, fence.upper)?;
        }

        writeln!(f)?;
        write_averages(f, "Average Bids by Color:", &report.average_by_product_type)?;
        writeln!(f)?;
        write_averages(f, "Average Bids by Shoe Size:", &report.average_by_shoe_size)?;

        writeln!(f)?;
        if let Some(first) = report.revenue.first() {
            writeln!(f, "Initial Revenue: ${:.2}", first.initial_revenue)?;
        }
        for projection in &report.revenue {
            let pct = projection.supply_change * 100.0;
            if pct == 0.0 {
                writeln!(f, "Revenue with Unchanged Supply: ${:.2}", projection.adjusted_revenue)?;
                continue;
            }
            let direction = if pct > 0.0 { "Increased" } else { "Decreased" };
            writeln!(
                f,
                "Revenue with {:.0}% {} Supply: ${:.2}",
                pct.abs(),
                direction,
                projection.adjusted_revenue
            )?;
        }

        for curve in &report.demand_curves {
            writeln!(f)?;
            write!(f, "{}", DemandChart(curve))?;
        }

        Ok(())
    }
}

fn write_averages(f: &mut fmt::Formatter<'_>, title: &str, averages: &[GroupAverage]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    if averages.is_empty() {
        return writeln!(f, "  (none)");
    }
    for avg in averages {
        writeln!(f, "  {:<12}{:>10.2}  ({} bids)", avg.key.to_string(), avg.mean, avg.count)?;
    }
    Ok(())
}

/// Horizontal text chart of a demand curve with its supply line.
///
/// One bar per ranked bid; a marker line is drawn after the bid at the
/// supply rank.
pub struct DemandChart<'a>(pub &'a DemandCurve);

impl fmt::Display for DemandChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let curve = self.0;
        writeln!(
            f,
            "Demand and Supply for {} Shoes Size {} (supply = {}, clearing = {:.2})",
            capitalize(&curve.variant.product_type),
            curve.variant.shoe_size,
            curve.supply_limit,
            curve.clearing_price,
        )?;

        let top = curve.points.first().map(|p| p.amount).unwrap_or(0.0);
        for point in &curve.points {
            let len = if top > 0.0 {
                ((point.amount / top) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            writeln!(f, "  {:>4} | {:<width$} {:.2}", point.rank, "#".repeat(len), point.amount, width = CHART_WIDTH)?;
            if point.rank as u64 == curve.supply_limit {
                writeln!(f, "  {:->width$}  supply = {}", "", curve.supply_limit, width = CHART_WIDTH + 7)?;
            }
        }
        if curve.supply_limit > curve.points.len() as u64 {
            writeln!(
                f,
                "  {:->width$}  supply = {} (not exhausted)",
                "",
                curve.supply_limit,
                width = CHART_WIDTH + 7
            )?;
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
