//! Level-shift detection between recent actuals and the early forecast.

use tracing::debug;

use diagnostic_spi::{
    DetectorKind, DetectorResult, DiagnosticError, DiagnosticInput, Detector, MagnitudeEvidence,
    Result,
};

use crate::stats::mean;

/// Default relative level difference above which a shift is flagged.
pub const DEFAULT_MAGNITUDE_THRESHOLD: f64 = 0.5;

/// Flags an early forecast whose level departs from recent actuals.
///
/// The relative difference is `|mean(early) - mean(recent)| / mean(recent)`.
/// A zero recent mean gives `+inf` (or `0` when the forecast mean is also
/// zero). The comparison is strict, so a difference exactly at the threshold
/// does not fire. An infinite difference still yields a confidence of `1`.
///
/// @algorithm RelativeLevelShift
/// @category MagnitudeDetector
/// @complexity O(w)
/// @thread_safe true
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeDetector {
    threshold: f64,
}

impl MagnitudeDetector {
    pub fn new(threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(DiagnosticError::invalid_parameter(
                "threshold",
                "must be positive and finite",
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn check(&self, recent_actuals: &[f64], early_forecast: &[f64]) -> Result<DetectorResult> {
        for window in [recent_actuals, early_forecast] {
            if window.is_empty() {
                return Err(DiagnosticError::InsufficientData {
                    required: 1,
                    actual: 0,
                });
            }
        }

        let recent_mean = mean(recent_actuals);
        let forecast_mean = mean(early_forecast);
        let pct_difference = relative_difference(recent_mean, forecast_mean);

        let shifted = pct_difference > self.threshold;
        let confidence = (pct_difference / self.threshold).min(1.0);

        debug!(recent_mean, forecast_mean, pct_difference, shifted, "magnitude check");

        Ok(DetectorResult::new(
            shifted,
            confidence,
            MagnitudeEvidence {
                recent_mean,
                forecast_mean,
                pct_difference,
                threshold: self.threshold,
            },
        ))
    }
}

impl Default for MagnitudeDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MAGNITUDE_THRESHOLD,
        }
    }
}

impl Detector for MagnitudeDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::MagnitudeMismatch
    }

    fn evaluate(&self, input: &DiagnosticInput<'_>) -> Result<DetectorResult> {
        self.check(input.recent_actuals.values(), input.early_forecast.values())
    }
}

fn relative_difference(recent_mean: f64, forecast_mean: f64) -> f64 {
    if recent_mean != 0.0 {
        (forecast_mean - recent_mean).abs() / recent_mean
    } else if forecast_mean != 0.0 {
        debug!("recent mean is zero; relative difference is infinite");
        f64::INFINITY
    } else {
        0.0
    }
}

/// Detect a level shift with the default threshold.
pub fn detect_magnitude_mismatch(
    recent_actuals: &[f64],
    early_forecast: &[f64],
) -> Result<DetectorResult> {
    MagnitudeDetector::default().check(recent_actuals, early_forecast)
}
