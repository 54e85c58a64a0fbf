//! Natural-language explanation of a diagnosis.
//!
//! The explanation is chosen from which detectors fired, never from rendered
//! text.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use diagnostic_spi::{AggregateResult, DetectorKind, Evidence, Series};

use crate::stats::{mean, sample_std};

/// Canned explanation for a combination of detected issues.
///
/// Precedence: a trend reversal paired with lost seasonality, then with
/// over-smoothing, then alone; otherwise lost seasonality, over-smoothing and
/// level shift in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Explanation {
    TrendAndSeasonality,
    TrendAndVolatility,
    TrendReversal,
    MissingSeasonality,
    OverSmoothed,
    LevelShift,
    Aligned,
}

impl Explanation {
    /// Select the explanation for an aggregate result.
    pub fn select(result: &AggregateResult) -> Self {
        let fired = |kind| result.is_detected(kind);
        match (
            fired(DetectorKind::TrendMismatch),
            fired(DetectorKind::MissingSeasonality),
            fired(DetectorKind::VolatilityMismatch),
            fired(DetectorKind::MagnitudeMismatch),
        ) {
            (true, true, _, _) => Self::TrendAndSeasonality,
            (true, false, true, _) => Self::TrendAndVolatility,
            (true, false, false, _) => Self::TrendReversal,
            (false, true, _, _) => Self::MissingSeasonality,
            (false, false, true, _) => Self::OverSmoothed,
            (false, false, false, true) => Self::LevelShift,
            (false, false, false, false) => Self::Aligned,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::TrendAndSeasonality => {
                "The forecast has several problems. The model appears to have missed the \
                 direction of the historical trend, and the clear seasonal pattern of the \
                 past is absent from the forecast, which looks unnaturally flat. The model \
                 likely needs recalibration, or an approach that captures both trend and \
                 seasonal components."
            }
            Self::TrendAndVolatility => {
                "The forecast reverses the historical trend and is also much smoother than \
                 the history. The reversal may come from fitting recent noise or from a \
                 structural break the model did not account for; the smoothness suggests \
                 the model is overly conservative."
            }
            Self::TrendReversal => {
                "The forecast runs in the opposite direction to the historical trend. This \
                 points to model miscalibration or to a structural break in the series \
                 that needs attention."
            }
            Self::MissingSeasonality => {
                "The forecast misses seasonal patterns present in the history. Seasonal \
                 cycles matter for demand planning; seasonal decomposition or a model \
                 suited to seasonal series would likely help."
            }
            Self::OverSmoothed => {
                "The forecast is unusually flat compared with the natural variation of the \
                 history. Over-smoothing risks understocking in high-demand periods and \
                 overstocking in low-demand ones; the model should reflect realistic \
                 demand uncertainty."
            }
            Self::LevelShift => {
                "There is a large gap between recent actual demand and the first forecast \
                 periods. The model may not account for recent level shifts; recalibrating \
                 on more recent data or changing the baseline could help."
            }
            Self::Aligned => {
                "The forecast is consistent with historical patterns. No significant issue \
                 was found in trend direction, seasonality, volatility or magnitude."
            }
        }
    }
}

/// Explanation for an aggregate result.
pub fn explain(result: &AggregateResult) -> Explanation {
    Explanation::select(result)
}

/// Structured plain-text summary of one item's diagnosis.
pub fn analysis_summary(
    item_id: &str,
    result: &AggregateResult,
    historical: &Series,
    forecast: &Series,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis for item {}:", item_id);
    for (label, series) in [("Historical", historical), ("Forecast", forecast)] {
        let values = series.values();
        let _ = writeln!(
            out,
            "{} data: {} months, mean={:.2}, std={:.2}",
            label,
            values.len(),
            mean(values),
            sample_std(values)
        );
    }
    out.push('\n');

    let issues: Vec<String> = result
        .iter()
        .filter(|r| r.detected())
        .map(|r| {
            format!(
                "{} (confidence: {:.2}): {}",
                issue_tag(r.kind()),
                r.confidence(),
                describe(r.evidence())
            )
        })
        .collect();

    if issues.is_empty() {
        out.push_str("No significant issues detected.");
    } else {
        out.push_str("ISSUES DETECTED:");
        for issue in issues {
            let _ = write!(out, "\n- {}", issue);
        }
    }
    out
}

fn issue_tag(kind: DetectorKind) -> &'static str {
    match kind {
        DetectorKind::TrendMismatch => "TREND MISMATCH",
        DetectorKind::MissingSeasonality => "MISSING SEASONALITY",
        DetectorKind::VolatilityMismatch => "VOLATILITY MISMATCH",
        DetectorKind::MagnitudeMismatch => "MAGNITUDE MISMATCH",
    }
}

fn describe(evidence: &Evidence) -> String {
    match evidence {
        Evidence::Trend(e) => format!(
            "Historical trend is {} but forecast trend is {}",
            e.historical_trend, e.forecast_trend
        ),
        Evidence::Seasonality(e) => format!(
            "Historical data shows seasonal patterns (strength: {:.2}) but forecast appears flat (strength: {:.2})",
            e.hist_seasonal_strength, e.forecast_seasonal_strength
        ),
        Evidence::Volatility(e) => format!(
            "Forecast is too flat compared to historical volatility. Historical CV: {:.2}, Forecast CV: {:.2}",
            e.hist_cv, e.forecast_cv
        ),
        Evidence::Magnitude(e) => format!(
            "Early forecast mean ({:.2}) differs from recent actuals mean ({:.2}) by {:.1}%",
            e.forecast_mean,
            e.recent_mean,
            e.pct_difference * 100.0
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnostic_spi::{
        DetectorResult, MagnitudeEvidence, SeasonalityEvidence, TrendDirection, TrendEvidence,
        VolatilityEvidence,
    };

    fn trend(detected: bool) -> DetectorResult {
        DetectorResult::new(
            detected,
            0.8,
            TrendEvidence {
                hist_slope: 1.0,
                forecast_slope: -1.0,
                hist_r_squared: 0.64,
                forecast_r_squared: 0.81,
                historical_trend: TrendDirection::Increasing,
                forecast_trend: TrendDirection::Decreasing,
            },
        )
    }

    fn seasonality(detected: bool) -> DetectorResult {
        DetectorResult::new(
            detected,
            1.0,
            SeasonalityEvidence {
                hist_seasonal_strength: 2.4,
                forecast_seasonal_strength: 0.0,
                threshold: 1.5,
            },
        )
    }

    fn volatility(detected: bool) -> DetectorResult {
        DetectorResult::new(
            detected,
            1.0,
            VolatilityEvidence {
                hist_cv: 0.15,
                forecast_cv: 0.0,
                volatility_ratio: 0.0,
                threshold: 0.5,
            },
        )
    }

    fn magnitude(detected: bool) -> DetectorResult {
        DetectorResult::new(
            detected,
            1.0,
            MagnitudeEvidence {
                recent_mean: 100.0,
                forecast_mean: 180.0,
                pct_difference: 0.8,
                threshold: 0.5,
            },
        )
    }

    fn aggregate(t: bool, s: bool, v: bool, m: bool) -> AggregateResult {
        AggregateResult::from_results(vec![trend(t), seasonality(s), volatility(v), magnitude(m)])
    }

    #[test]
    fn test_selection_precedence() {
        let cases = [
            ((true, true, true, true), Explanation::TrendAndSeasonality),
            ((true, false, true, true), Explanation::TrendAndVolatility),
            ((true, false, false, true), Explanation::TrendReversal),
            ((false, true, true, true), Explanation::MissingSeasonality),
            ((false, false, true, true), Explanation::OverSmoothed),
            ((false, false, false, true), Explanation::LevelShift),
            ((false, false, false, false), Explanation::Aligned),
        ];
        for ((t, s, v, m), expected) in cases {
            assert_eq!(explain(&aggregate(t, s, v, m)), expected, "{:?}", (t, s, v, m));
        }
    }

    #[test]
    fn test_every_explanation_has_text() {
        let all = [
            Explanation::TrendAndSeasonality,
            Explanation::TrendAndVolatility,
            Explanation::TrendReversal,
            Explanation::MissingSeasonality,
            Explanation::OverSmoothed,
            Explanation::LevelShift,
            Explanation::Aligned,
        ];
        for e in all {
            assert!(!e.text().is_empty());
        }
    }

    #[test]
    fn test_summary_lists_detected_issues() {
        let hist = Series::new(vec![10.0, 20.0, 30.0]).unwrap();
        let fc = Series::new(vec![5.0, 5.0]).unwrap();
        let summary = analysis_summary("ITEM-1", &aggregate(false, true, false, true), &hist, &fc);

        assert!(summary.starts_with("Analysis for item ITEM-1:"));
        assert!(summary.contains("Historical data: 3 months, mean=20.00, std=10.00"));
        assert!(summary.contains("Forecast data: 2 months, mean=5.00, std=0.00"));
        assert!(summary.contains("- MISSING SEASONALITY (confidence: 1.00)"));
        assert!(summary.contains("by 80.0%"));
        assert!(!summary.contains("TREND MISMATCH"));
    }

    #[test]
    fn test_summary_without_issues() {
        let hist = Series::new(vec![1.0, 2.0]).unwrap();
        let summary = analysis_summary("X", &aggregate(false, false, false, false), &hist, &hist);
        assert!(summary.ends_with("No significant issues detected."));
    }
}
