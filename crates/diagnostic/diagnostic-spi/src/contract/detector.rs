//! Detector trait definition.

use crate::error::Result;
use crate::model::{DetectorKind, DetectorResult, Series, Window};

/// Everything a detector may read for one item.
///
/// `recent_actuals` is expected to be a tail of `historical` and
/// `early_forecast` a head of `forecast`; that relationship is the caller's
/// responsibility and is not checked.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticInput<'a> {
    pub historical: &'a Series,
    pub forecast: &'a Series,
    pub recent_actuals: Window<'a>,
    pub early_forecast: Window<'a>,
}

impl<'a> DiagnosticInput<'a> {
    pub fn new(
        historical: &'a Series,
        forecast: &'a Series,
        recent_actuals: Window<'a>,
        early_forecast: Window<'a>,
    ) -> Self {
        Self {
            historical,
            forecast,
            recent_actuals,
            early_forecast,
        }
    }

    /// Derive both windows from the parent segments: the last `window` points
    /// of `historical` and the first `window` points of `forecast`.
    pub fn from_segments(historical: &'a Series, forecast: &'a Series, window: usize) -> Self {
        Self::new(
            historical,
            forecast,
            historical.tail(window),
            forecast.head(window),
        )
    }
}

/// A forecast consistency check.
///
/// Implementations are pure: the same input always yields the same result and
/// no state is shared between calls, so detectors can be evaluated in
/// parallel.
pub trait Detector: Send + Sync {
    /// Which check this detector performs.
    fn kind(&self) -> DetectorKind;

    /// Run the check.
    fn evaluate(&self, input: &DiagnosticInput<'_>) -> Result<DetectorResult>;
}
