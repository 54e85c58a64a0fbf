//! Series and window types.

use serde::{Deserialize, Serialize};

use crate::error::{DiagnosticError, Result};

/// Default length of the recent-actuals and early-forecast windows.
pub const DEFAULT_WINDOW: usize = 6;

/// One contiguous, chronologically ordered time segment.
///
/// A series is never empty and holds only finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Create a series, rejecting empty input and non-finite values.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(DiagnosticError::InvalidData("series is empty".to_string()));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(DiagnosticError::InvalidData(format!(
                "non-finite value {} at index {}",
                values[i], i
            )));
        }
        Ok(Self { values })
    }

    /// The underlying values in time order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First `n` points (all of them when the series is shorter).
    pub fn head(&self, n: usize) -> Window<'_> {
        Window::new(&self.values[..n.min(self.values.len())])
    }

    /// Last `n` points (all of them when the series is shorter).
    pub fn tail(&self, n: usize) -> Window<'_> {
        let start = self.values.len().saturating_sub(n);
        Window::new(&self.values[start..])
    }

    /// The whole series as a window.
    pub fn as_window(&self) -> Window<'_> {
        Window::new(&self.values)
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = DiagnosticError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Series> for Vec<f64> {
    fn from(series: Series) -> Self {
        series.values
    }
}

/// Read-only head or tail slice of a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    values: &'a [f64],
}

impl<'a> Window<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
