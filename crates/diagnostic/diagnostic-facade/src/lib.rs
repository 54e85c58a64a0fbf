//! Forecast Diagnostics Facade
//!
//! Unified re-exports for the diagnostics engine.
//!
//! This facade provides a single entry point to:
//! - The `Detector` trait, series types and result model from SPI
//! - Configuration types from API
//! - Detector implementations, aggregation, explanation and reporting from Core

// Re-export everything from API (which includes SPI and core)
pub use diagnostic_api::*;

// Explicit re-exports for documentation
pub use diagnostic_api::prelude;

// Re-export core modules for direct access
pub use diagnostic_core::{aggregator, magnitude, report, seasonality, stats, trend, volatility};
