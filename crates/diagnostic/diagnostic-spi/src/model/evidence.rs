//! Detector-specific diagnostic measurements.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DetectorKind;

/// Direction of a fitted linear trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    /// Label a slope. A slope of exactly zero is reported as `Decreasing`.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Increasing
        } else {
            Self::Decreasing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear fits of both segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEvidence {
    pub hist_slope: f64,
    pub forecast_slope: f64,
    pub hist_r_squared: f64,
    pub forecast_r_squared: f64,
    pub historical_trend: TrendDirection,
    pub forecast_trend: TrendDirection,
}

/// Spectral seasonal strength of both segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityEvidence {
    pub hist_seasonal_strength: f64,
    pub forecast_seasonal_strength: f64,
    pub threshold: f64,
}

/// Coefficients of variation and their ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEvidence {
    pub hist_cv: f64,
    pub forecast_cv: f64,
    pub volatility_ratio: f64,
    pub threshold: f64,
}

/// Level comparison between recent actuals and the early forecast.
///
/// `pct_difference` is `+inf` when the recent mean is zero and the forecast
/// mean is not. It serializes as the string `"inf"` in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeEvidence {
    pub recent_mean: f64,
    pub forecast_mean: f64,
    #[serde(with = "extended_f64")]
    pub pct_difference: f64,
    pub threshold: f64,
}

/// Payload attached to a [`super::DetectorResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    Trend(TrendEvidence),
    Seasonality(SeasonalityEvidence),
    Volatility(VolatilityEvidence),
    Magnitude(MagnitudeEvidence),
}

impl Evidence {
    /// The detector this payload belongs to.
    pub fn kind(&self) -> DetectorKind {
        match self {
            Self::Trend(_) => DetectorKind::TrendMismatch,
            Self::Seasonality(_) => DetectorKind::MissingSeasonality,
            Self::Volatility(_) => DetectorKind::VolatilityMismatch,
            Self::Magnitude(_) => DetectorKind::MagnitudeMismatch,
        }
    }

    pub fn as_trend(&self) -> Option<&TrendEvidence> {
        match self {
            Self::Trend(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_seasonality(&self) -> Option<&SeasonalityEvidence> {
        match self {
            Self::Seasonality(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_volatility(&self) -> Option<&VolatilityEvidence> {
        match self {
            Self::Volatility(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_magnitude(&self) -> Option<&MagnitudeEvidence> {
        match self {
            Self::Magnitude(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TrendEvidence> for Evidence {
    fn from(e: TrendEvidence) -> Self {
        Self::Trend(e)
    }
}

impl From<SeasonalityEvidence> for Evidence {
    fn from(e: SeasonalityEvidence) -> Self {
        Self::Seasonality(e)
    }
}

impl From<VolatilityEvidence> for Evidence {
    fn from(e: VolatilityEvidence) -> Self {
        Self::Volatility(e)
    }
}

impl From<MagnitudeEvidence> for Evidence {
    fn from(e: MagnitudeEvidence) -> Self {
        Self::Magnitude(e)
    }
}

/// Serde form for floats that may be infinite: finite values stay numbers,
/// non-finite ones become `"inf"`, `"-inf"` or `"nan"`.
mod extended_f64 {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid float '{}'", other))),
            },
        }
    }
}
