//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the central error type used by
//! long-run variance estimation and sandwich covariance construction.
//! An alias `InferenceResult<T>` standardizes the return type across
//! inference code.

/// Unified error type for inference routines.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Moment matrix has fewer rows than the requested bandwidth allows.
    BandwidthTooLarge { bandwidth: usize, rows: usize },

    /// Moment matrix is empty or has zero columns.
    EmptyMomentMatrix,

    /// Jacobian of the mean moment conditions is numerically singular
    /// (smallest singular value at or below the floor).
    SingularJacobian { smallest_singular_value: f64 },

    /// Numeric Jacobian contains non-finite entries on both the central
    /// and forward difference paths.
    InvalidJacobian { row: usize, col: usize, value: f64 },

    /// Jacobian dimensions do not match the moment/parameter counts.
    JacobianDimMismatch { expected: (usize, usize), found: (usize, usize) },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::BandwidthTooLarge { bandwidth, rows } => {
                write!(
                    f,
                    "Inference Error: bandwidth {bandwidth} too large for {rows} moment rows"
                )
            }
            InferenceError::EmptyMomentMatrix => {
                write!(f, "Inference Error: empty moment-condition matrix")
            }
            InferenceError::SingularJacobian { smallest_singular_value } => {
                write!(
                    f,
                    "Inference Error: singular moment Jacobian (smallest singular value = {smallest_singular_value})"
                )
            }
            InferenceError::InvalidJacobian { row, col, value } => {
                write!(f, "Inference Error: invalid Jacobian at ({row}, {col}): {value}")
            }
            InferenceError::JacobianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Inference Error: Jacobian dimension mismatch: expected {expected:?}, found {found:?}"
                )
            }
        }
    }
}
