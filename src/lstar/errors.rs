//! lstar::errors — error taxonomy for the smooth-transition layer.
//!
//! Purpose
//! -------
//! Collect LSTAR-specific failures (malformed keep specifications,
//! misaligned samples) and wrap the errors propagated from the
//! regression, optimization, and inference layers. Optimizer
//! non-convergence is reported through the fit's `converged` flag, not
//! through this enum.
use crate::inference::errors::InferenceError;
use crate::optimization::errors::OptError;
use crate::regression::errors::RegressionError;

/// Result alias for the LSTAR layer.
pub type LstarResult<T> = Result<T, LstarError>;

#[derive(Debug, Clone, PartialEq)]
pub enum LstarError {
    // ---- Configuration ----
    /// Malformed (γ, c) keep specification. Hard error.
    InvalidGcSpec { reason: &'static str },
    /// A free parameter vector does not match the keep specification.
    FreeLengthMismatch { expected: usize, found: usize },

    // ---- Sample ----
    /// Sample arrays are not row-aligned or empty after pruning.
    InvalidSample { reason: &'static str },

    // ---- Propagated ----
    Regression(RegressionError),
    Optimization(OptError),
    Inference(InferenceError),
}

impl std::error::Error for LstarError {}

impl std::fmt::Display for LstarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LstarError::InvalidGcSpec { reason } => {
                write!(f, "LSTAR Error: invalid (gamma, c) specification: {reason}")
            }
            LstarError::FreeLengthMismatch { expected, found } => {
                write!(
                    f,
                    "LSTAR Error: free parameter vector has length {found}, expected {expected}"
                )
            }
            LstarError::InvalidSample { reason } => {
                write!(f, "LSTAR Error: invalid sample: {reason}")
            }
            LstarError::Regression(err) => write!(f, "LSTAR Error: {err}"),
            LstarError::Optimization(err) => write!(f, "LSTAR Error: {err}"),
            LstarError::Inference(err) => write!(f, "LSTAR Error: {err}"),
        }
    }
}

impl From<RegressionError> for LstarError {
    fn from(err: RegressionError) -> Self {
        LstarError::Regression(err)
    }
}

impl From<OptError> for LstarError {
    fn from(err: OptError) -> Self {
        LstarError::Optimization(err)
    }
}

impl From<InferenceError> for LstarError {
    fn from(err: InferenceError) -> Self {
        LstarError::Inference(err)
    }
}
