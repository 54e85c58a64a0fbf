//! Integration tests for the diagnostics engine
//!
//! Exercise each detector through the facade and check the result
//! invariants that every diagnosis must satisfy.

use diagnostic_facade::prelude::*;
use diagnostic_facade::{magnitude, seasonality, trend, volatility, DEFAULT_WINDOW};
use std::f64::consts::PI;

fn seasonal_with_trend(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 2.0 * i as f64 + 20.0 * (2.0 * PI * i as f64 / 12.0).sin())
        .collect()
}

/// Deterministic pseudo-random walk.
fn wobble(n: usize, seed: u64, level: f64, step: f64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut value = level;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = (state >> 11) as f64 / (1u64 << 53) as f64;
            value += (u - 0.5) * step;
            value
        })
        .collect()
}

// ============================================================================
// Detector behaviour
// ============================================================================

#[test]
fn test_trend_reversal_detected() {
    let hist: Vec<f64> = (0..24).map(|i| 50.0 + 1.5 * i as f64 + (i % 3) as f64).collect();
    let fc: Vec<f64> = (0..12).map(|i| 80.0 - 2.0 * i as f64 + (i % 2) as f64).collect();

    let result = trend::detect_trend_mismatch(&hist, &fc).unwrap();
    assert!(result.detected());
    assert!(result.confidence() > 0.9 && result.confidence() <= 1.0);
}

#[test]
fn test_trend_same_direction_clear() {
    let hist: Vec<f64> = (0..24).map(|i| 50.0 + 1.5 * i as f64).collect();
    let fc: Vec<f64> = (0..12).map(|i| 86.0 + 0.5 * i as f64).collect();

    let result = trend::detect_trend_mismatch(&hist, &fc).unwrap();
    assert!(!result.detected());
    assert_eq!(result.confidence(), 0.0);
}

#[test]
fn test_seasonality_lost_in_flat_forecast() {
    let result =
        seasonality::detect_missing_seasonality(&seasonal_with_trend(36), &[112.0; 18]).unwrap();
    assert!(result.detected());

    let e = result.evidence().as_seasonality().unwrap();
    assert!(e.forecast_seasonal_strength < 1e-6);
    assert!(e.hist_seasonal_strength > e.threshold);
}

#[test]
fn test_volatility_flat_forecast() {
    let hist = seasonal_with_trend(36);
    let result = volatility::detect_volatility_mismatch(&hist, &[112.0; 18]).unwrap();
    assert!(result.detected());
    assert_eq!(result.confidence(), 1.0);
    assert_eq!(result.evidence().as_volatility().unwrap().volatility_ratio, 0.0);
}

#[test]
fn test_magnitude_boundary() {
    let recent = [100.0; DEFAULT_WINDOW];
    assert!(magnitude::detect_magnitude_mismatch(&recent, &[150.1; 6]).unwrap().detected());
    assert!(!magnitude::detect_magnitude_mismatch(&recent, &[149.9; 6]).unwrap().detected());
    assert!(!magnitude::detect_magnitude_mismatch(&recent, &[150.0; 6]).unwrap().detected());
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_result_invariants_over_many_inputs() {
    let aggregator = DiagnosticAggregator::default();

    for seed in 0..200u64 {
        let hist_len = 2 + (seed as usize % 40);
        let fc_len = 2 + (seed as usize * 7 % 24);
        let level = if seed % 5 == 0 { 0.0 } else { 50.0 + seed as f64 };
        let hist = Series::new(wobble(hist_len, seed, level, 20.0)).unwrap();
        let fc = Series::new(wobble(fc_len, seed + 1000, level * 1.3, 5.0)).unwrap();

        let input = DiagnosticInput::from_segments(&hist, &fc, DEFAULT_WINDOW);
        let result = aggregator.run(&input).unwrap();

        assert_eq!(result.results.len(), 4);
        for r in result.iter() {
            assert!(
                (0.0..=1.0).contains(&r.confidence()),
                "seed {}: {} confidence {}",
                seed,
                r.kind(),
                r.confidence()
            );
            if !r.detected() {
                assert_eq!(r.confidence(), 0.0, "seed {}: {}", seed, r.kind());
            }
        }

        let summary = result.summary;
        let detected = result.iter().filter(|r| r.detected()).count();
        assert_eq!(summary.total_issues, detected);
        assert!(summary.risk_score.is_finite());
        assert_eq!(summary.risk_score, summary.total_issues as f64 * summary.avg_confidence);
        if detected == 0 {
            assert_eq!(summary.avg_confidence, 0.0);
            assert_eq!(summary.risk_score, 0.0);
        }
        if detected == 1 {
            let sole = result.iter().find(|r| r.detected()).unwrap();
            assert_eq!(summary.risk_score, sole.confidence());
        }
    }
}

#[test]
fn test_infinite_level_shift_stays_finite() {
    let hist = Series::new(vec![0.0; 12]).unwrap();
    let fc = Series::new(vec![10.0; 6]).unwrap();
    let result = run_all_diagnostics(&hist, &fc, hist.tail(6), fc.head(6)).unwrap();

    assert!(result.is_detected(DetectorKind::MagnitudeMismatch));
    assert_eq!(result.get(DetectorKind::MagnitudeMismatch).unwrap().confidence(), 1.0);
    assert!(result.summary.risk_score.is_finite());
}

#[test]
fn test_too_short_segment_fails_whole_run() {
    let hist = Series::new(vec![10.0; 12]).unwrap();
    let fc = Series::new(vec![10.0]).unwrap();
    let err = run_all_diagnostics(&hist, &fc, hist.tail(6), fc.head(6)).unwrap_err();
    assert!(matches!(err, DiagnosticError::InsufficientData { .. }));
}
