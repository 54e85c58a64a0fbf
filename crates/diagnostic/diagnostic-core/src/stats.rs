//! Numeric helpers shared by the detectors.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use diagnostic_spi::{DiagnosticError, Result};

/// Arithmetic mean. Returns `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); `0` for fewer than two points.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Coefficient of variation, defined as `0` when the mean is exactly zero.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    sample_std(values) / m
}

/// Ordinary least squares fit of `y = intercept + slope * t`, `t = 0..n-1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation between `t` and `y`; `0` for a constant series.
    pub r: f64,
}

impl LinearFit {
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }
}

/// Fit a line against position indices. Needs at least two points.
pub fn linear_fit(values: &[f64]) -> Result<LinearFit> {
    let n = values.len();
    if n < 2 {
        return Err(DiagnosticError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let t_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let (mut s_tt, mut s_yy, mut s_ty) = (0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dt = i as f64 - t_mean;
        let dy = y - y_mean;
        s_tt += dt * dt;
        s_yy += dy * dy;
        s_ty += dt * dy;
    }

    let slope = s_ty / s_tt;
    let r = if s_yy == 0.0 {
        0.0
    } else {
        (s_ty / (s_tt * s_yy).sqrt()).clamp(-1.0, 1.0)
    };

    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * t_mean,
        r,
    })
}

/// Magnitudes of the discrete Fourier transform, one per frequency bin.
pub fn magnitude_spectrum(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    buffer.iter().map(|c| c.norm()).collect()
}
