//! Diagnostic error types.

use thiserror::Error;

/// Errors that can occur while diagnosing a forecast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticError {
    /// A segment is too short for the requested computation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Input values that cannot form a series
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl DiagnosticError {
    /// Shorthand for an [`DiagnosticError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for diagnostic operations.
pub type Result<T> = std::result::Result<T, DiagnosticError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_insufficient_data_error_message() {
        let error = DiagnosticError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 2 points, got 1"
        );
    }

    #[test]
    fn test_insufficient_data_error_fields() {
        let error = DiagnosticError::InsufficientData {
            required: 2,
            actual: 0,
        };
        if let DiagnosticError::InsufficientData { required, actual } = error {
            assert_eq!(required, 2);
            assert_eq!(actual, 0);
        } else {
            panic!("Expected InsufficientData variant");
        }
    }

    #[test]
    fn test_invalid_parameter_error_message() {
        let error = DiagnosticError::invalid_parameter("threshold", "must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'threshold': must be positive"
        );
    }

    #[test]
    fn test_invalid_data_error_message() {
        let error = DiagnosticError::InvalidData("series is empty".to_string());
        assert_eq!(error.to_string(), "Invalid data: series is empty");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error> = Box::new(DiagnosticError::InvalidData("x".to_string()));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_can_be_boxed_send_sync() {
        let error = DiagnosticError::InsufficientData {
            required: 2,
            actual: 1,
        };
        let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
        assert!(boxed.to_string().contains("got 1"));
    }

    #[test]
    fn test_error_debug_impl() {
        let error = DiagnosticError::InsufficientData {
            required: 10,
            actual: 5,
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InsufficientData"));
        assert!(debug_str.contains("10"));
        assert!(debug_str.contains("5"));
    }

    #[test]
    fn test_all_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagnosticError>();
    }
}
