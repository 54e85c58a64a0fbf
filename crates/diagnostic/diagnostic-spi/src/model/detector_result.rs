//! Per-detector result type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Evidence;

/// Identifies one of the four forecast consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    TrendMismatch,
    MissingSeasonality,
    VolatilityMismatch,
    MagnitudeMismatch,
}

impl DetectorKind {
    /// Every kind, in reporting order.
    pub const ALL: [DetectorKind; 4] = [
        DetectorKind::TrendMismatch,
        DetectorKind::MissingSeasonality,
        DetectorKind::VolatilityMismatch,
        DetectorKind::MagnitudeMismatch,
    ];

    /// Stable machine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrendMismatch => "trend_mismatch",
            Self::MissingSeasonality => "missing_seasonality",
            Self::VolatilityMismatch => "volatility_mismatch",
            Self::MagnitudeMismatch => "magnitude_mismatch",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TrendMismatch => "Trend Mismatch",
            Self::MissingSeasonality => "Missing Seasonality",
            Self::VolatilityMismatch => "Volatility Mismatch",
            Self::MagnitudeMismatch => "Magnitude Mismatch",
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one detector.
///
/// `confidence` is always within `[0, 1]` and is exactly `0` when
/// `detected` is false. Every construction path, deserialization included,
/// goes through [`DetectorResult::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDetectorResult")]
pub struct DetectorResult {
    kind: DetectorKind,
    detected: bool,
    confidence: f64,
    evidence: Evidence,
}

/// Wire form of a [`DetectorResult`]; `kind` is re-derived from the evidence.
#[derive(Deserialize)]
struct RawDetectorResult {
    detected: bool,
    confidence: f64,
    evidence: Evidence,
}

impl From<RawDetectorResult> for DetectorResult {
    fn from(raw: RawDetectorResult) -> Self {
        Self::new(raw.detected, raw.confidence, raw.evidence)
    }
}

impl DetectorResult {
    /// Build a result, zeroing confidence when nothing was detected and
    /// clamping it into `[0, 1]` otherwise.
    pub fn new(detected: bool, confidence: f64, evidence: impl Into<Evidence>) -> Self {
        let evidence = evidence.into();
        let confidence = if detected {
            clamp_confidence(confidence)
        } else {
            0.0
        };
        Self {
            kind: evidence.kind(),
            detected,
            confidence,
            evidence,
        }
    }

    /// A result for a check that did not fire.
    pub fn clear(evidence: impl Into<Evidence>) -> Self {
        Self::new(false, 0.0, evidence)
    }

    pub fn kind(&self) -> DetectorKind {
        self.kind
    }

    pub fn detected(&self) -> bool {
        self.detected
    }

    /// Within `[0, 1]`; `0` when not detected.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
