//! Forecast Diagnostics Consumer API
//!
//! Configuration types and builders for the diagnostics engine.
//!
//! This crate provides:
//! - Serializable configuration for every detector and for windowing
//! - [`DiagnosticsConfig::build`] to assemble a configured aggregator
//! - Re-exports from SPI and core for convenience

// Re-export from core
pub use diagnostic_core::{
    aggregator, analysis_summary, detailed_report, explain, issue_breakdown, rank_by_risk,
    report, run_all_diagnostics, stats, summary_table, DiagnosticAggregator, Explanation,
    ItemReport, MagnitudeDetector, SeasonalityDetector, TrendDetector, VolatilityDetector,
};

// Re-export types from SPI
pub use diagnostic_spi::{
    AggregateResult, DetectorKind, DetectorResult, DiagnosticError, DiagnosticInput,
    DiagnosticSummary, Detector, Evidence, MagnitudeEvidence, Result, SeasonalityEvidence,
    Series, TrendDirection, TrendEvidence, VolatilityEvidence, Window, DEFAULT_WINDOW,
};

use diagnostic_core::magnitude::DEFAULT_MAGNITUDE_THRESHOLD;
use diagnostic_core::seasonality::{DEFAULT_SEASONAL_PERIOD, DEFAULT_SEASONALITY_THRESHOLD};
use diagnostic_core::volatility::DEFAULT_VOLATILITY_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Detector Configuration
// ============================================================================

/// Seasonality detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalityConfig {
    /// Spectral strength above which a segment is seasonal (default: 1.5).
    pub threshold: f64,
    /// Assumed cycle length in observations (default: 12).
    pub period: usize,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SEASONALITY_THRESHOLD,
            period: DEFAULT_SEASONAL_PERIOD,
        }
    }
}

/// Volatility detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityConfig {
    /// Minimum forecast/historical CV ratio (default: 0.5).
    pub threshold: f64,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VOLATILITY_THRESHOLD,
        }
    }
}

/// Magnitude detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnitudeConfig {
    /// Relative level difference that counts as a shift (default: 0.5).
    pub threshold: f64,
}

impl Default for MagnitudeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MAGNITUDE_THRESHOLD,
        }
    }
}

/// Recent-actuals / early-forecast window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window length in observations (default: 6).
    pub months: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            months: DEFAULT_WINDOW,
        }
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Complete diagnostics configuration.
///
/// Missing fields in a JSON document fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub seasonality: SeasonalityConfig,
    pub volatility: VolatilityConfig,
    pub magnitude: MagnitudeConfig,
    pub window: WindowConfig,
}

impl DiagnosticsConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DiagnosticError::invalid_parameter("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DiagnosticError::invalid_parameter("config", format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Check every value; building the detectors performs the same checks.
    pub fn validate(&self) -> Result<()> {
        if self.window.months == 0 {
            return Err(DiagnosticError::invalid_parameter(
                "window.months",
                "must be at least 1",
            ));
        }
        self.build().map(|_| ())
    }

    /// Assemble an aggregator with the four configured detectors.
    pub fn build(&self) -> Result<DiagnosticAggregator> {
        Ok(DiagnosticAggregator::new()
            .with_detector(TrendDetector::new())
            .with_detector(SeasonalityDetector::with_period(
                self.seasonality.threshold,
                self.seasonality.period,
            )?)
            .with_detector(VolatilityDetector::new(self.volatility.threshold)?)
            .with_detector(MagnitudeDetector::new(self.magnitude.threshold)?))
    }

    /// Input for one item, windows derived with the configured length.
    pub fn input<'a>(&self, historical: &'a Series, forecast: &'a Series) -> DiagnosticInput<'a> {
        DiagnosticInput::from_segments(historical, forecast, self.window.months)
    }

    /// Build the aggregator and diagnose one item.
    pub fn run(&self, historical: &Series, forecast: &Series) -> Result<AggregateResult> {
        self.validate()?;
        self.build()?.run(&self.input(historical, forecast))
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DiagnosticsConfig, MagnitudeConfig, SeasonalityConfig, VolatilityConfig, WindowConfig,
    };
    pub use diagnostic_core::{
        run_all_diagnostics, DiagnosticAggregator, Explanation, ItemReport, MagnitudeDetector,
        SeasonalityDetector, TrendDetector, VolatilityDetector,
    };
    pub use diagnostic_spi::{
        AggregateResult, DetectorKind, DetectorResult, DiagnosticError, DiagnosticInput,
        Detector, Result, Series, Window,
    };
}
