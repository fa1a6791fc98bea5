//! Validated run configuration for the minimizers.
//!
//! Convention: we *minimize* a user loss directly; there is no sign
//! flip anywhere in this layer. The estimators stop on a function
//! tolerance or a hard iteration cap and nothing else, so the
//! configuration is deliberately small.
use crate::optimization::errors::{OptError, OptResult};

/// Minimizer-level configuration.
///
/// Fields:
/// - `tol: f64` — function tolerance (simplex standard deviation for
///   Nelder–Mead, interval tolerance for golden section).
/// - `max_iter: usize` — hard cap on solver iterations; a budget guard
///   against non-convergence, not a wall-clock timeout.
/// - `verbose: bool` — if `true`, a non-convergence warning is printed
///   to stderr by the calling estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    pub tol: f64,
    pub max_iter: usize,
    pub verbose: bool,
}

impl MinimizeOptions {
    /// Construct validated options.
    ///
    /// # Rules
    /// - `tol` must be finite and strictly positive.
    /// - `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolerance`] for non-finite or non-positive `tol`.
    /// - [`OptError::InvalidMaxIter`] for `max_iter == 0`.
    pub fn new(tol: f64, max_iter: usize, verbose: bool) -> OptResult<Self> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(OptError::InvalidTolerance {
                tol,
                reason: "Function tolerance must be finite and strictly positive.",
            });
        }
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol, max_iter, verbose })
    }
}

impl Default for MinimizeOptions {
    /// Defaults match the nonlinear least-squares drivers: tolerance
    /// 1e-12 with a 10000-iteration budget, quiet.
    fn default() -> Self {
        Self { tol: 1e-12, max_iter: 10_000, verbose: false }
    }
}
