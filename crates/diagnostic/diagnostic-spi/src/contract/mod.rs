//! Contract definitions for forecast diagnostics.
//!
//! This module contains the trait every detector implements and the input
//! bundle it evaluates.

mod detector;

pub use detector::{DiagnosticInput, Detector};
