//! Fan-out of all detectors and folding into a risk summary.

use rayon::prelude::*;
use tracing::info;

use diagnostic_spi::{AggregateResult, DetectorKind, DiagnosticInput, Detector, Result, Series, Window};

use crate::magnitude::MagnitudeDetector;
use crate::seasonality::SeasonalityDetector;
use crate::trend::TrendDetector;
use crate::volatility::VolatilityDetector;

/// Runs a set of detectors over one input and combines their results.
///
/// Detectors are evaluated in parallel on the rayon pool. The first error
/// aborts the run: a partial diagnosis is never returned.
///
/// # Example
///
/// ```rust
/// use diagnostic_core::{DiagnosticAggregator, DiagnosticInput, Series};
///
/// let historical = Series::new((0..36).map(|i| 100.0 + (i % 12) as f64 * 5.0).collect()).unwrap();
/// let forecast = Series::new(vec![130.0; 18]).unwrap();
/// let input = DiagnosticInput::from_segments(&historical, &forecast, 6);
///
/// let result = DiagnosticAggregator::default().run(&input).unwrap();
/// assert_eq!(result.results.len(), 4);
/// ```
pub struct DiagnosticAggregator {
    detectors: Vec<Box<dyn Detector>>,
}

impl DiagnosticAggregator {
    /// An aggregator with no detectors.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Add a detector.
    pub fn with_detector(mut self, detector: impl Detector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Add an already boxed detector.
    pub fn add_detector(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Kinds of the registered detectors, in registration order.
    pub fn kinds(&self) -> Vec<DetectorKind> {
        self.detectors.iter().map(|d| d.kind()).collect()
    }

    /// Evaluate every detector and summarise.
    pub fn run(&self, input: &DiagnosticInput<'_>) -> Result<AggregateResult> {
        let results = self
            .detectors
            .par_iter()
            .map(|detector| detector.evaluate(input))
            .collect::<Result<Vec<_>>>()?;

        let aggregate = AggregateResult::from_results(results);
        info!(
            total_issues = aggregate.summary.total_issues,
            avg_confidence = aggregate.summary.avg_confidence,
            risk_score = aggregate.summary.risk_score,
            "diagnostics complete"
        );
        Ok(aggregate)
    }
}

impl Default for DiagnosticAggregator {
    /// The four standard detectors with default thresholds.
    fn default() -> Self {
        Self::new()
            .with_detector(TrendDetector)
            .with_detector(SeasonalityDetector::default())
            .with_detector(VolatilityDetector::default())
            .with_detector(MagnitudeDetector::default())
    }
}

/// Run the four standard detectors with default thresholds.
pub fn run_all_diagnostics(
    historical: &Series,
    forecast: &Series,
    recent_actuals: Window<'_>,
    early_forecast: Window<'_>,
) -> Result<AggregateResult> {
    let input = DiagnosticInput::new(historical, forecast, recent_actuals, early_forecast);
    DiagnosticAggregator::default().run(&input)
}
