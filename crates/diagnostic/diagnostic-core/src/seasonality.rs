//! Missing seasonality detection.
//!
//! Seasonal strength is read off the DFT magnitude spectrum at a single bin,
//! `n / period` (bin 1 for segments shorter than one period), relative to the
//! mean magnitude of all non-DC bins. With monthly data and `period = 12` the
//! bin approximates an annual cycle. This is a coarse heuristic, not a search
//! for the dominant periodogram peak: a history whose cycle has a different
//! length can score low.

use tracing::debug;

use diagnostic_spi::{
    DetectorKind, DetectorResult, DiagnosticError, DiagnosticInput, Detector, Result,
    SeasonalityEvidence,
};

use crate::stats::magnitude_spectrum;

/// Default strength above which a segment counts as seasonal.
pub const DEFAULT_SEASONALITY_THRESHOLD: f64 = 1.5;

/// Default assumed cycle length in observations.
pub const DEFAULT_SEASONAL_PERIOD: usize = 12;

/// Flags a forecast that drops seasonality present in the history.
///
/// @algorithm FftBinStrength
/// @category SeasonalityDetector
/// @complexity O(n log n)
/// @thread_safe true
#[derive(Debug, Clone, Copy)]
pub struct SeasonalityDetector {
    threshold: f64,
    period: usize,
}

impl SeasonalityDetector {
    /// Create a detector with the given strength threshold and the default
    /// period.
    pub fn new(threshold: f64) -> Result<Self> {
        Self::with_period(threshold, DEFAULT_SEASONAL_PERIOD)
    }

    /// Create a detector with an explicit assumed cycle length.
    pub fn with_period(threshold: f64, period: usize) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(DiagnosticError::invalid_parameter(
                "threshold",
                "must be positive and finite",
            ));
        }
        if period < 2 {
            return Err(DiagnosticError::invalid_parameter(
                "period",
                "must be at least 2",
            ));
        }
        Ok(Self { threshold, period })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Seasonal strength of one segment. Needs at least two points.
    pub fn strength(&self, values: &[f64]) -> Result<f64> {
        seasonal_strength(values, self.period)
    }

    pub fn check(&self, historical: &[f64], forecast: &[f64]) -> Result<DetectorResult> {
        let hist_strength = self.strength(historical)?;
        let forecast_strength = self.strength(forecast)?;

        let hist_seasonal = hist_strength > self.threshold;
        let forecast_seasonal = forecast_strength > self.threshold;
        let missing = hist_seasonal && !forecast_seasonal;

        debug!(
            hist_strength,
            forecast_strength,
            missing,
            "seasonality check"
        );

        Ok(DetectorResult::new(
            missing,
            (hist_strength / self.threshold).min(1.0),
            SeasonalityEvidence {
                hist_seasonal_strength: hist_strength,
                forecast_seasonal_strength: forecast_strength,
                threshold: self.threshold,
            },
        ))
    }
}

impl Default for SeasonalityDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SEASONALITY_THRESHOLD,
            period: DEFAULT_SEASONAL_PERIOD,
        }
    }
}

impl Detector for SeasonalityDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::MissingSeasonality
    }

    fn evaluate(&self, input: &DiagnosticInput<'_>) -> Result<DetectorResult> {
        self.check(input.historical.values(), input.forecast.values())
    }
}

/// Seasonal strength at bin `n / period` (or bin 1 when `n < period`).
pub fn seasonal_strength(values: &[f64], period: usize) -> Result<f64> {
    let n = values.len();
    if n < 2 {
        return Err(DiagnosticError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    if values.iter().all(|&v| v == values[0]) {
        debug!(n, "constant segment; seasonal strength set to 0");
        return Ok(0.0);
    }

    let spectrum = magnitude_spectrum(values);
    let bin = if n >= period { n / period } else { 1 };
    let rest_mean = spectrum[1..].iter().sum::<f64>() / (n - 1) as f64;

    // non-DC energy within FFT rounding error of the DC term
    if rest_mean <= f64::EPSILON * n as f64 * spectrum[0] {
        debug!(n, rest_mean, "flat spectrum; seasonal strength set to 0");
        return Ok(0.0);
    }

    Ok(spectrum[bin] / rest_mean)
}

/// Detect lost seasonality with the default threshold and period.
pub fn detect_missing_seasonality(
    historical: &[f64],
    forecast: &[f64],
) -> Result<DetectorResult> {
    SeasonalityDetector::default().check(historical, forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn seasonal_with_trend(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 2.0 * i as f64 + 20.0 * (2.0 * PI * i as f64 / 12.0).sin())
            .collect()
    }

    #[test]
    fn test_seasonal_history_flat_forecast() {
        let result = detect_missing_seasonality(&seasonal_with_trend(36), &[112.0; 18]).unwrap();
        assert!(result.detected());
        assert_eq!(result.confidence(), 1.0);

        let e = result.evidence().as_seasonality().unwrap();
        assert!(e.hist_seasonal_strength > 2.0, "{}", e.hist_seasonal_strength);
        assert!(e.forecast_seasonal_strength.abs() < 1e-6);
        assert_eq!(e.threshold, DEFAULT_SEASONALITY_THRESHOLD);
    }

    #[test]
    fn test_seasonal_forecast_not_detected() {
        let hist = seasonal_with_trend(36);
        let forecast: Vec<f64> = (0..24)
            .map(|i| 170.0 + 20.0 * (2.0 * PI * i as f64 / 12.0).sin())
            .collect();
        let result = detect_missing_seasonality(&hist, &forecast).unwrap();
        assert!(!result.detected());
        assert_eq!(result.confidence(), 0.0);
    }

    #[test]
    fn test_non_seasonal_history_not_detected() {
        // period-2 alternation puts all energy at bin 18, none at bin 3
        let hist: Vec<f64> = (0..36)
            .map(|i| if i % 2 == 0 { 105.0 } else { 95.0 })
            .collect();
        let result = detect_missing_seasonality(&hist, &[112.0; 18]).unwrap();
        assert!(!result.detected());
    }

    #[test]
    fn test_short_segment_uses_bin_one() {
        // one full cycle over 6 points lands in bin 1
        let data: Vec<f64> = (0..6)
            .map(|i| 10.0 + (2.0 * PI * i as f64 / 6.0).cos())
            .collect();
        let strength = seasonal_strength(&data, 12).unwrap();
        // bins 1 and 5 carry all non-DC energy: mean over 5 bins is 2 * 3 / 5
        assert!((strength - 3.0 / (6.0 / 5.0)).abs() < 1e-9, "{}", strength);
    }

    #[test]
    fn test_single_point_is_error() {
        let err = detect_missing_seasonality(&seasonal_with_trend(36), &[5.0]).unwrap_err();
        assert!(matches!(
            err,
            DiagnosticError::InsufficientData {
                required: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(SeasonalityDetector::new(0.0).is_err());
        assert!(SeasonalityDetector::new(f64::NAN).is_err());
        assert!(SeasonalityDetector::with_period(1.5, 1).is_err());
        assert_eq!(SeasonalityDetector::new(2.0).unwrap().period(), 12);
    }

    #[test]
    fn test_high_level_seasonality_detected() {
        let hist: Vec<f64> = (0..36)
            .map(|i| 1e9 + 10.0 * (2.0 * PI * i as f64 / 12.0).sin())
            .collect();
        let strength = seasonal_strength(&hist, DEFAULT_SEASONAL_PERIOD).unwrap();
        // bins 3 and 33 each carry 180: mean over 35 bins is 360 / 35
        assert!((strength - 17.5).abs() < 1e-3, "{}", strength);

        let result = detect_missing_seasonality(&hist, &[1e9; 18]).unwrap();
        assert!(result.detected());
        let e = result.evidence().as_seasonality().unwrap();
        assert_eq!(e.forecast_seasonal_strength, 0.0);
    }

    #[test]
    fn test_custom_period() {
        // a 6-point cycle over 36 points sits at bin 6, which period 6 reads
        let hist: Vec<f64> = (0..36)
            .map(|i| 100.0 + 20.0 * (2.0 * PI * i as f64 / 6.0).sin())
            .collect();
        let annual = SeasonalityDetector::default().check(&hist, &[100.0; 12]).unwrap();
        let semiannual = SeasonalityDetector::with_period(1.5, 6)
            .unwrap()
            .check(&hist, &[100.0; 12])
            .unwrap();
        assert!(!annual.detected());
        assert!(semiannual.detected());
    }
}
