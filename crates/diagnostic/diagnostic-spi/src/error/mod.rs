//! Error types for forecast diagnostics.
//!
//! This module contains error types and the Result alias.

mod diagnostic_error;

pub use diagnostic_error::{DiagnosticError, Result};
