//! Trend reversal detection.

use tracing::debug;

use diagnostic_spi::{
    DetectorKind, DetectorResult, DiagnosticInput, Detector, Result, TrendDirection,
    TrendEvidence,
};

use crate::stats::linear_fit;

/// Flags a forecast whose linear trend runs opposite to the history's.
///
/// Both segments are fitted with OLS against their position indices. A
/// mismatch requires one strictly positive and one strictly negative slope; a
/// zero slope never triggers. Confidence is the weaker of the two |r| values,
/// so a reversal only scores high when both fits are tight.
///
/// @algorithm OlsSlopeSign
/// @category TrendDetector
/// @complexity O(n)
/// @thread_safe true
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendDetector;

impl TrendDetector {
    pub fn new() -> Self {
        Self
    }

    /// Compare the trends of a historical and a forecast segment.
    ///
    /// Fails with `InsufficientData` when either segment has fewer than two
    /// points.
    pub fn check(&self, historical: &[f64], forecast: &[f64]) -> Result<DetectorResult> {
        let hist = linear_fit(historical)?;
        let fc = linear_fit(forecast)?;

        let mismatch =
            (hist.slope > 0.0 && fc.slope < 0.0) || (hist.slope < 0.0 && fc.slope > 0.0);
        let confidence = hist.r.abs().min(fc.r.abs());

        debug!(
            hist_slope = hist.slope,
            forecast_slope = fc.slope,
            mismatch,
            "trend check"
        );

        Ok(DetectorResult::new(
            mismatch,
            confidence,
            TrendEvidence {
                hist_slope: hist.slope,
                forecast_slope: fc.slope,
                hist_r_squared: hist.r_squared(),
                forecast_r_squared: fc.r_squared(),
                historical_trend: TrendDirection::from_slope(hist.slope),
                forecast_trend: TrendDirection::from_slope(fc.slope),
            },
        ))
    }
}

impl Detector for TrendDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::TrendMismatch
    }

    fn evaluate(&self, input: &DiagnosticInput<'_>) -> Result<DetectorResult> {
        self.check(input.historical.values(), input.forecast.values())
    }
}

/// Detect a trend reversal between history and forecast.
pub fn detect_trend_mismatch(historical: &[f64], forecast: &[f64]) -> Result<DetectorResult> {
    TrendDetector.check(historical, forecast)
}
