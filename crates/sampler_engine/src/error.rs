//! Error types for the sampling engine.
//!
//! Every sampling routine validates its parameters and the shape of the
//! caller-provided output storage before the first draw, so an error always
//! leaves the caller's buffers untouched.

use thiserror::Error;

/// Sampling engine error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SamplingError {
    /// A distribution parameter is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Caller-provided output storage has the wrong shape.
    #[error("Allocation mismatch for '{buffer}': expected {expected}, got {actual}")]
    AllocationMismatch {
        /// Name of the offending buffer.
        buffer: &'static str,
        /// Expected shape, rendered for display.
        expected: String,
        /// Actual shape, rendered for display.
        actual: String,
    },

    /// A user-supplied transform produced NaN or infinity.
    #[error("Non-finite variate produced at index {index}")]
    NonFiniteVariate {
        /// Index of the first offending draw.
        index: usize,
    },
}

impl SamplingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(
        buffer: &'static str,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::AllocationMismatch {
            buffer,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type for sampling operations.
pub type SamplingResult<T> = Result<T, SamplingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = SamplingError::invalid("theta", "must lie in [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'theta': must lie in [0, 1], got 1.5"
        );
    }

    #[test]
    fn test_allocation_mismatch_display() {
        let err = SamplingError::mismatch("counts", "20x6", "20x5");
        assert!(err.to_string().contains("counts"));
        assert!(err.to_string().contains("expected 20x6, got 20x5"));
    }

    #[test]
    fn test_non_finite_display() {
        let err = SamplingError::NonFiniteVariate { index: 7 };
        assert!(err.to_string().contains("index 7"));
    }
}
