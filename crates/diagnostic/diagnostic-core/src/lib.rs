//! Forecast Diagnostics Core
//!
//! Detector implementations, aggregation into a risk score, explanation
//! selection and text reporting.
//!
//! - [`TrendDetector`]: opposite-sign linear trends
//! - [`SeasonalityDetector`]: seasonal energy lost in the forecast
//! - [`VolatilityDetector`]: forecast flattened relative to history
//! - [`MagnitudeDetector`]: level shift between recent actuals and early forecast

pub mod aggregator;
pub mod explain;
pub mod magnitude;
pub mod report;
pub mod seasonality;
pub mod stats;
pub mod trend;
pub mod volatility;

// Re-export SPI types for implementations
pub use diagnostic_spi::{
    AggregateResult, DetectorKind, DetectorResult, DiagnosticError, DiagnosticInput,
    DiagnosticSummary, Detector, Evidence, MagnitudeEvidence, Result, SeasonalityEvidence,
    Series, TrendDirection, TrendEvidence, VolatilityEvidence, Window, DEFAULT_WINDOW,
};

// Re-export main types
pub use aggregator::{run_all_diagnostics, DiagnosticAggregator};
pub use explain::{analysis_summary, explain, Explanation};
pub use magnitude::{detect_magnitude_mismatch, MagnitudeDetector};
pub use report::{detailed_report, issue_breakdown, rank_by_risk, summary_table, ItemReport};
pub use seasonality::{detect_missing_seasonality, SeasonalityDetector};
pub use trend::{detect_trend_mismatch, TrendDetector};
pub use volatility::{detect_volatility_mismatch, VolatilityDetector};
