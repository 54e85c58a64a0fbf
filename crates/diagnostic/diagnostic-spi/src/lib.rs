//! Forecast Diagnostics Service Provider Interface
//!
//! Defines the detector contract, the diagnostic result model and the error
//! types shared by every diagnostics crate.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{DiagnosticInput, Detector};
pub use error::{DiagnosticError, Result};
pub use model::{
    AggregateResult, DetectorKind, DetectorResult, DiagnosticSummary, Evidence,
    MagnitudeEvidence, SeasonalityEvidence, Series, TrendDirection, TrendEvidence,
    VolatilityEvidence, Window, DEFAULT_WINDOW,
};
