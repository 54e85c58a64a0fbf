//! Per-item reports and cross-item summaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use diagnostic_spi::{AggregateResult, DetectorKind, Evidence};

use crate::explain::explain;

/// Diagnosis of one item, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub item_id: String,
    pub risk_score: f64,
    pub total_issues: usize,
    pub avg_confidence: f64,
    pub explanation: String,
    pub diagnostics: AggregateResult,
}

impl ItemReport {
    /// Build a report, attaching the explanation selected for the result.
    pub fn new(item_id: impl Into<String>, diagnostics: AggregateResult) -> Self {
        let summary = diagnostics.summary;
        Self {
            item_id: item_id.into(),
            risk_score: summary.risk_score,
            total_issues: summary.total_issues,
            avg_confidence: summary.avg_confidence,
            explanation: explain(&diagnostics).text().to_string(),
            diagnostics,
        }
    }
}

/// Multi-section text report for one item.
pub fn detailed_report(report: &ItemReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== FORECAST ANALYSIS REPORT ===");
    let _ = writeln!(out, "Item ID: {}", report.item_id);
    let _ = writeln!(out, "Risk Score: {:.3}", report.risk_score);
    let _ = writeln!(out, "Issues Detected: {}", report.total_issues);
    let _ = writeln!(out, "Average Confidence: {:.3}", report.avg_confidence);
    let _ = writeln!(out);
    let _ = writeln!(out, "=== EXPLANATION ===");
    let _ = writeln!(out, "{}", report.explanation);
    let _ = writeln!(out);
    let _ = write!(out, "=== DETAILED DIAGNOSTICS ===");

    for result in report.diagnostics.iter() {
        let _ = write!(
            out,
            "\n{}: {}\n  Confidence: {:.3}",
            result.kind().title(),
            if result.detected() { "DETECTED" } else { "Not detected" },
            result.confidence()
        );
        match result.evidence() {
            Evidence::Trend(e) => {
                let _ = write!(
                    out,
                    "\n  Historical Trend: {}\n  Forecast Trend: {}",
                    e.historical_trend, e.forecast_trend
                );
            }
            Evidence::Seasonality(e) => {
                let _ = write!(
                    out,
                    "\n  Historical Seasonal Strength: {:.3}\n  Forecast Seasonal Strength: {:.3}",
                    e.hist_seasonal_strength, e.forecast_seasonal_strength
                );
            }
            Evidence::Volatility(e) => {
                let _ = write!(
                    out,
                    "\n  Historical CV: {:.3}\n  Forecast CV: {:.3}\n  Volatility Ratio: {:.3}",
                    e.hist_cv, e.forecast_cv, e.volatility_ratio
                );
            }
            Evidence::Magnitude(e) => {
                let _ = write!(
                    out,
                    "\n  Recent Actuals Mean: {:.2}\n  Early Forecast Mean: {:.2}\n  Percentage Difference: {:.1}%",
                    e.recent_mean,
                    e.forecast_mean,
                    e.pct_difference * 100.0
                );
            }
        }
    }
    out
}

/// The `top_n` reports with the highest risk score, highest first.
///
/// Ties keep their input order.
pub fn rank_by_risk(reports: &[ItemReport], top_n: usize) -> Vec<&ItemReport> {
    let mut ranked: Vec<&ItemReport> = reports.iter().collect();
    ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    ranked.truncate(top_n);
    ranked
}

/// Number of items on which each detector fired. Every kind is present.
pub fn issue_breakdown(reports: &[ItemReport]) -> BTreeMap<DetectorKind, usize> {
    let mut breakdown: BTreeMap<DetectorKind, usize> =
        DetectorKind::ALL.iter().map(|&k| (k, 0)).collect();
    for report in reports {
        for kind in report.diagnostics.detected_kinds() {
            *breakdown.entry(kind).or_insert(0) += 1;
        }
    }
    breakdown
}

/// Fixed-width table of items sorted by descending risk.
pub fn summary_table(reports: &[ItemReport]) -> String {
    let mut out = format!(
        "{:<24} {:>8} {:>7} {:>9}  {:<5} {:<5} {:<5} {:<5}",
        "item_id", "risk", "issues", "avg_conf", "trend", "seas", "vol", "mag"
    );
    let flag = |r: &ItemReport, kind| if r.diagnostics.is_detected(kind) { "yes" } else { "-" };

    for r in rank_by_risk(reports, reports.len()) {
        let _ = write!(
            out,
            "\n{:<24} {:>8.3} {:>7} {:>9.3}  {:<5} {:<5} {:<5} {:<5}",
            r.item_id,
            r.risk_score,
            r.total_issues,
            r.avg_confidence,
            flag(r, DetectorKind::TrendMismatch),
            flag(r, DetectorKind::MissingSeasonality),
            flag(r, DetectorKind::VolatilityMismatch),
            flag(r, DetectorKind::MagnitudeMismatch),
        );
    }
    out
}
