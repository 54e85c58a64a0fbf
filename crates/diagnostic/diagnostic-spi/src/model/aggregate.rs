//! Aggregate diagnostic result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DetectorKind, DetectorResult};

/// Risk summary over all detector results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    /// Number of detectors that fired.
    pub total_issues: usize,
    /// Mean confidence over fired detectors only, `0` when none fired.
    pub avg_confidence: f64,
    /// `total_issues * avg_confidence`.
    pub risk_score: f64,
}

impl DiagnosticSummary {
    /// Fold detector results into a summary.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a DetectorResult>,
    {
        let confidences: Vec<f64> = results
            .into_iter()
            .filter(|r| r.detected())
            .map(|r| r.confidence())
            .collect();

        let total_issues = confidences.len();
        if total_issues == 0 {
            return Self::default();
        }

        let avg_confidence = confidences.iter().sum::<f64>() / total_issues as f64;
        Self {
            total_issues,
            avg_confidence,
            risk_score: total_issues as f64 * avg_confidence,
        }
    }
}

impl Default for DiagnosticSummary {
    fn default() -> Self {
        Self {
            total_issues: 0,
            avg_confidence: 0.0,
            risk_score: 0.0,
        }
    }
}

/// Results of every detector keyed by kind, plus the risk summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub results: BTreeMap<DetectorKind, DetectorResult>,
    pub summary: DiagnosticSummary,
}

impl AggregateResult {
    /// Build from detector results. A later result for the same kind replaces
    /// an earlier one; the summary is computed over the retained results.
    pub fn from_results(results: impl IntoIterator<Item = DetectorResult>) -> Self {
        let results: BTreeMap<DetectorKind, DetectorResult> =
            results.into_iter().map(|r| (r.kind(), r)).collect();
        let summary = DiagnosticSummary::from_results(results.values());
        Self { results, summary }
    }

    pub fn get(&self, kind: DetectorKind) -> Option<&DetectorResult> {
        self.results.get(&kind)
    }

    /// Whether the given detector ran and fired.
    pub fn is_detected(&self, kind: DetectorKind) -> bool {
        self.get(kind).map_or(false, |r| r.detected())
    }

    /// Kinds that fired, in reporting order.
    pub fn detected_kinds(&self) -> Vec<DetectorKind> {
        self.results
            .values()
            .filter(|r| r.detected())
            .map(|r| r.kind())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectorResult> {
        self.results.values()
    }
}
