//! Over-smoothing detection.

use tracing::debug;

use diagnostic_spi::{
    DetectorKind, DetectorResult, DiagnosticError, DiagnosticInput, Detector, Result,
    VolatilityEvidence,
};

use crate::stats::coefficient_of_variation;

/// Default minimum acceptable ratio of forecast CV to historical CV.
pub const DEFAULT_VOLATILITY_THRESHOLD: f64 = 0.5;

/// Flags a forecast that is much smoother than its history.
///
/// Dispersion is compared through the coefficient of variation (sample std
/// over mean). A zero-mean segment has CV `0`, which lumps "no dispersion"
/// together with "undefined dispersion". When the history's CV is `0` the
/// ratio is defined as `1`, so a constant history never flags a flat
/// forecast.
///
/// @algorithm CvRatio
/// @category VolatilityDetector
/// @complexity O(n)
/// @thread_safe true
#[derive(Debug, Clone, Copy)]
pub struct VolatilityDetector {
    threshold: f64,
}

impl VolatilityDetector {
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

    pub fn check(&self, historical: &[f64], forecast: &[f64]) -> Result<DetectorResult> {
        for segment in [historical, forecast] {
            if segment.is_empty() {
                return Err(DiagnosticError::InsufficientData {
                    required: 1,
                    actual: 0,
                });
            }
        }

        let hist_cv = coefficient_of_variation(historical);
        let forecast_cv = coefficient_of_variation(forecast);

        let ratio = if hist_cv == 0.0 {
            debug!("historical CV is zero; volatility ratio set to 1");
            1.0
        } else {
            forecast_cv / hist_cv
        };

        let too_flat = ratio < self.threshold;
        // ratio < threshold keeps this positive; a negative ratio (negative
        // mean segment) is clamped to 1 by DetectorResult
        let confidence = (self.threshold - ratio) / self.threshold;

        debug!(hist_cv, forecast_cv, ratio, too_flat, "volatility check");

        Ok(DetectorResult::new(
            too_flat,
            confidence,
            VolatilityEvidence {
                hist_cv,
                forecast_cv,
                volatility_ratio: ratio,
                threshold: self.threshold,
            },
        ))
    }
}

impl Default for VolatilityDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VOLATILITY_THRESHOLD,
        }
    }
}

impl Detector for VolatilityDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::VolatilityMismatch
    }

    fn evaluate(&self, input: &DiagnosticInput<'_>) -> Result<DetectorResult> {
        self.check(input.historical.values(), input.forecast.values())
    }
}

/// Detect an over-smoothed forecast with the default threshold.
pub fn detect_volatility_mismatch(historical: &[f64], forecast: &[f64]) -> Result<DetectorResult> {
    VolatilityDetector::default().check(historical, forecast)
}
