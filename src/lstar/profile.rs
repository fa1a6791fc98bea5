//! lstar::profile — the (γ, c) keep specification and its resolution.
//!
//! Purpose
//! -------
//! Decide, per slot, whether the transition slope γ and location c are
//! fixed by the caller or estimated, and map between the free parameter
//! vector the optimizer sees and the resolved `(γ, c)` pair the loss
//! evaluates. The four canonical combinations are tagged by
//! [`EstimationKind`]; anything else is the hard
//! [`LstarError::InvalidGcSpec`] error.
//!
//! Conventions
//! -----------
//! - Free slots are ordered γ-then-c in the free vector.
//! - The slope is canonicalized `γ ≥ 0` on resolution: `γ` and `−γ`
//!   describe the same logistic curve approached from opposite sides,
//!   so the absolute value picks one representative uniformly.
use crate::lstar::errors::{LstarError, LstarResult};
use crate::optimization::outcome::Theta;
use ndarray::Array1;

/// One slot of the keep specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GcSlot {
    /// Held at this value; not part of the free vector.
    Fixed(f64),
    /// Estimated; occupies a free-vector slot.
    Estimate,
}

/// Keep specification for the transition parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcSpec {
    pub gamma: GcSlot,
    pub c: GcSlot,
}

/// The four canonical estimation configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationKind {
    BothEstimated,
    /// Only the location c is estimated.
    COnly,
    /// Only the slope γ is estimated.
    GammaOnly,
    NeitherEstimated,
}

impl GcSpec {
    /// Build a spec from a legacy 2-entry keep vector where NaN marks
    /// an estimated slot.
    ///
    /// # Errors
    /// - [`LstarError::InvalidGcSpec`] when the vector is not length 2
    ///   or a fixed value is non-finite.
    pub fn from_keep(keep: &[f64]) -> LstarResult<Self> {
        if keep.len() != 2 {
            return Err(LstarError::InvalidGcSpec {
                reason: "keep vector must have exactly two entries (gamma, c)",
            });
        }
        let slot = |v: f64| -> LstarResult<GcSlot> {
            if v.is_nan() {
                Ok(GcSlot::Estimate)
            } else if v.is_finite() {
                Ok(GcSlot::Fixed(v))
            } else {
                Err(LstarError::InvalidGcSpec { reason: "fixed values must be finite" })
            }
        };
        Ok(Self { gamma: slot(keep[0])?, c: slot(keep[1])? })
    }

    pub fn kind(&self) -> EstimationKind {
        match (self.gamma, self.c) {
            (GcSlot::Estimate, GcSlot::Estimate) => EstimationKind::BothEstimated,
            (GcSlot::Fixed(_), GcSlot::Estimate) => EstimationKind::COnly,
            (GcSlot::Estimate, GcSlot::Fixed(_)) => EstimationKind::GammaOnly,
            (GcSlot::Fixed(_), GcSlot::Fixed(_)) => EstimationKind::NeitherEstimated,
        }
    }

    /// Number of free transition-parameter slots.
    pub fn free_len(&self) -> usize {
        match self.kind() {
            EstimationKind::BothEstimated => 2,
            EstimationKind::COnly | EstimationKind::GammaOnly => 1,
            EstimationKind::NeitherEstimated => 0,
        }
    }

    /// Resolve `(γ, c)` from a free vector, canonicalizing `γ ≥ 0`.
    ///
    /// # Errors
    /// - [`LstarError::FreeLengthMismatch`] when `free.len()` does not
    ///   match [`GcSpec::free_len`].
    pub fn resolve(&self, free: &Theta) -> LstarResult<(f64, f64)> {
        if free.len() != self.free_len() {
            return Err(LstarError::FreeLengthMismatch {
                expected: self.free_len(),
                found: free.len(),
            });
        }
        let (gamma, c) = match (self.gamma, self.c) {
            (GcSlot::Estimate, GcSlot::Estimate) => (free[0], free[1]),
            (GcSlot::Fixed(g), GcSlot::Estimate) => (g, free[0]),
            (GcSlot::Estimate, GcSlot::Fixed(c)) => (free[0], c),
            (GcSlot::Fixed(g), GcSlot::Fixed(c)) => (g, c),
        };
        Ok((gamma.abs(), c))
    }

    /// Project a candidate `(γ, c)` pair onto the free slots.
    pub fn free_from(&self, gamma: f64, c: f64) -> Theta {
        let free = match self.kind() {
            EstimationKind::BothEstimated => vec![gamma, c],
            EstimationKind::COnly => vec![c],
            EstimationKind::GammaOnly => vec![gamma],
            EstimationKind::NeitherEstimated => vec![],
        };
        Array1::from(free)
    }
}
