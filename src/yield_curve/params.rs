//! yield_curve::params — curve parameters and the restriction model.
//!
//! Purpose
//! -------
//! Define the full Nelson–Siegel/Svensson parameter set and the
//! [`CurveSpec`] tag that governs which slots are free in estimation.
//! The tag replaces positional length dispatch: each variant states the
//! model form (standard vs extended) and whether the short-rate
//! restriction `b1 = s0 − b0` is active, together with the restriction
//! value where applicable.
//!
//! Key behaviors
//! -------------
//! - `reduce` projects a full parameter set onto the free slots in a
//!   fixed order: `[b0, (b1), b2, tau, (b3, tau2)]` with `b1` dropped
//!   under the restriction and `(b3, tau2)` dropped in standard form.
//! - `expand` rebuilds the full set from a free vector, enforcing the
//!   sign convention `b0, tau, tau2 ≥ 0` via absolute value and deriving
//!   `b1 = s0 − b0` under the restriction.
//! - `reduce ∘ expand` is the identity on free vectors whose sign-fixed
//!   slots are already nonnegative.
//!
//! Conventions
//! -----------
//! - The standard form pins `(b3, tau2) = (0, 1)` so the extended
//!   loading evaluates but contributes nothing.
use crate::optimization::outcome::Theta;
use crate::yield_curve::errors::{CurveError, CurveResult};
use ndarray::Array1;

/// Full Nelson–Siegel/Svensson parameter set.
///
/// `tau` and `tau2` are decay horizons and must be positive wherever a
/// curve is evaluated; [`CurveSpec::expand`] enforces this before any
/// evaluation during estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub tau: f64,
    pub b3: f64,
    pub tau2: f64,
}

impl CurveParams {
    /// Standard (non-extended) parameter set with `(b3, tau2) = (0, 1)`.
    pub fn standard(b0: f64, b1: f64, b2: f64, tau: f64) -> Self {
        Self { b0, b1, b2, tau, b3: 0.0, tau2: 1.0 }
    }

    pub fn extended(b0: f64, b1: f64, b2: f64, tau: f64, b3: f64, tau2: f64) -> Self {
        Self { b0, b1, b2, tau, b3, tau2 }
    }
}

/// Model form and restriction state for a curve estimation run.
///
/// Restricted variants carry the observed short rate `s0`; the level
/// slope identity `spot(0⁺) = b0 + b1 = s0` then makes `b1` derived
/// rather than free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveSpec {
    /// 4 free slots: `[b0, b1, b2, tau]`.
    StandardFree,
    /// 3 free slots: `[b0, b2, tau]`, `b1 = s0 − b0`.
    StandardRestricted { s0: f64 },
    /// 6 free slots: `[b0, b1, b2, tau, b3, tau2]`.
    ExtendedFree,
    /// 5 free slots: `[b0, b2, tau, b3, tau2]`, `b1 = s0 − b0`.
    ExtendedRestricted { s0: f64 },
}

impl CurveSpec {
    /// Number of free slots the optimizer searches over.
    pub fn free_len(&self) -> usize {
        match self {
            CurveSpec::StandardFree => 4,
            CurveSpec::StandardRestricted { .. } => 3,
            CurveSpec::ExtendedFree => 6,
            CurveSpec::ExtendedRestricted { .. } => 5,
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, CurveSpec::ExtendedFree | CurveSpec::ExtendedRestricted { .. })
    }

    /// The short-rate restriction value, when active.
    pub fn restriction(&self) -> Option<f64> {
        match self {
            CurveSpec::StandardRestricted { s0 } | CurveSpec::ExtendedRestricted { s0 } => Some(*s0),
            _ => None,
        }
    }

    /// Project a full parameter set onto the free slots.
    pub fn reduce(&self, full: &CurveParams) -> Theta {
        let mut free = Vec::with_capacity(self.free_len());
        free.push(full.b0);
        if self.restriction().is_none() {
            free.push(full.b1);
        }
        free.push(full.b2);
        free.push(full.tau);
        if self.is_extended() {
            free.push(full.b3);
            free.push(full.tau2);
        }
        Array1::from(free)
    }

    /// Rebuild the full parameter set from a free vector.
    ///
    /// Enforces the sign convention (`|b0|`, `|tau|`, `|tau2|`) and
    /// derives `b1` under the restriction. Standard variants pin
    /// `(b3, tau2) = (0, 1)`.
    ///
    /// # Errors
    /// - [`CurveError::ReducedLengthMismatch`] when `free.len()` does
    ///   not match [`CurveSpec::free_len`].
    pub fn expand(&self, free: &Theta) -> CurveResult<CurveParams> {
        if free.len() != self.free_len() {
            return Err(CurveError::ReducedLengthMismatch {
                expected: self.free_len(),
                found: free.len(),
            });
        }
        let b0 = free[0].abs();
        let (b1, rest) = match self.restriction() {
            Some(s0) => (s0 - b0, 1),
            None => (free[1], 2),
        };
        let b2 = free[rest];
        let tau = free[rest + 1].abs();
        let (b3, tau2) = if self.is_extended() {
            (free[rest + 2], free[rest + 3].abs())
        } else {
            (0.0, 1.0)
        };
        Ok(CurveParams { b0, b1, b2, tau, b3, tau2 })
    }
}
