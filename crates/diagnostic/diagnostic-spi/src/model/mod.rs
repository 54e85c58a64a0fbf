//! Data models for forecast diagnostics.
//!
//! This module contains the series types detectors read and the result types
//! they produce.

mod aggregate;
mod detector_result;
mod evidence;
mod series;

pub use aggregate::{AggregateResult, DiagnosticSummary};
pub use detector_result::{DetectorKind, DetectorResult};
pub use evidence::{
    Evidence, MagnitudeEvidence, SeasonalityEvidence, TrendDirection, TrendEvidence,
    VolatilityEvidence,
};
pub use series::{Series, Window, DEFAULT_WINDOW};
