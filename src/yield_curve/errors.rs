//! yield_curve::errors — error taxonomy for the yield-curve layer.
//!
//! Purpose
//! -------
//! Collect the failure modes of curve fitting in one enum: malformed
//! samples and weights, reduced-vector shape mismatches, yield
//! root-finder non-convergence, and wrapped optimizer errors. Optimizer
//! *non-convergence* is not an error here — estimators report it through
//! a `converged` flag instead.
use crate::optimization::errors::OptError;

/// Result alias for the yield-curve layer.
pub type CurveResult<T> = Result<T, CurveError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    // ---- Sample validation ----
    /// Estimation requires at least one bond.
    EmptySample,
    /// Per-bond weights must align with the bond sample.
    WeightLengthMismatch { expected: usize, found: usize },

    // ---- Parameter model ----
    /// Reduced parameter vector does not match the curve specification.
    ReducedLengthMismatch { expected: usize, found: usize },

    // ---- Yield root finder ----
    /// Newton/bisection failed to reach tolerance within the cap.
    YtmNonConvergent { target_price: f64, last_yield: f64 },
    /// No sign change found for the yield bracket.
    YtmBracketingFailed { lo: f64, hi: f64 },

    // ---- Optimizer ----
    /// Hard failure inside the minimization driver.
    Optimization(OptError),
}

impl std::error::Error for CurveError {}

impl std::fmt::Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveError::EmptySample => {
                write!(f, "Curve Error: bond sample is empty")
            }
            CurveError::WeightLengthMismatch { expected, found } => {
                write!(
                    f,
                    "Curve Error: weight vector length {found} does not match sample size {expected}"
                )
            }
            CurveError::ReducedLengthMismatch { expected, found } => {
                write!(
                    f,
                    "Curve Error: reduced parameter vector has length {found}, expected {expected}"
                )
            }
            CurveError::YtmNonConvergent { target_price, last_yield } => {
                write!(
                    f,
                    "Curve Error: yield root finder did not converge (target price = \
                     {target_price}, last yield = {last_yield})"
                )
            }
            CurveError::YtmBracketingFailed { lo, hi } => {
                write!(f, "Curve Error: yield root not bracketed on [{lo}, {hi}]")
            }
            CurveError::Optimization(err) => {
                write!(f, "Curve Error: {err}")
            }
        }
    }
}

impl From<OptError> for CurveError {
    fn from(err: OptError) -> Self {
        CurveError::Optimization(err)
    }
}
