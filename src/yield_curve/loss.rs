//! yield_curve::loss — weighted squared-error loss for curve fitting.
//!
//! Purpose
//! -------
//! Evaluate the scalar loss the nonlinear estimator minimizes: expand
//! the free parameter vector through the [`CurveSpec`], price every bond
//! in the sample, optionally convert fitted prices to fitted yields, and
//! accumulate `1.0 + 100·Σ wᵢ(fitᵢ − obsᵢ)²`. The affine constants
//! condition the optimizer and carry no meaning of their own; converged
//! parameters are invariant to them.
//!
//! Key behaviors
//! -------------
//! - [`LossSpace::Price`] compares fitted prices against observed
//!   prices; [`LossSpace::Yield`] runs the fitted price through the
//!   yield root finder and compares against observed yields.
//! - Weights are a scalar broadcast or a per-bond vector; the only
//!   validation failure is a length mismatch.
//! - The only evaluation failure is yield root-finder non-convergence,
//!   which surfaces through the `Objective` boundary as a hard error.
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::nelder_mead::Objective;
use crate::optimization::outcome::Theta;
use crate::yield_curve::bond::{cashflow_times, price_bond, yield_to_maturity, Bond, YTM_GUESS, YTM_TOL};
use crate::yield_curve::errors::{CurveError, CurveResult};
use crate::yield_curve::params::CurveSpec;
use ndarray::Array1;

/// Space in which pricing errors are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossSpace {
    /// Squared price errors; `Bond::observed` holds market prices.
    Price,
    /// Squared yield errors; `Bond::observed` holds market yields.
    Yield,
}

/// Per-observation weighting of the squared errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Weights {
    /// One weight broadcast over the whole sample.
    Uniform(f64),
    /// One weight per bond, aligned with the sample.
    PerBond(Array1<f64>),
}

impl Weights {
    /// Validate the weights against a sample of `n` bonds.
    pub fn validate(&self, n: usize) -> CurveResult<()> {
        match self {
            Weights::Uniform(_) => Ok(()),
            Weights::PerBond(w) if w.len() == n => Ok(()),
            Weights::PerBond(w) => {
                Err(CurveError::WeightLengthMismatch { expected: n, found: w.len() })
            }
        }
    }

    fn at(&self, i: usize) -> f64 {
        match self {
            Weights::Uniform(w) => *w,
            Weights::PerBond(w) => w[i],
        }
    }
}

/// Bond-pricing loss over a fixed sample and configuration.
///
/// Borrows the sample; one instance is built per estimation call and
/// evaluated many times by the optimizer.
pub struct PricingLoss<'a> {
    pub bonds: &'a [Bond],
    pub spec: CurveSpec,
    pub space: LossSpace,
    pub weights: Weights,
}

impl PricingLoss<'_> {
    /// Evaluate the loss at a free parameter vector.
    ///
    /// # Errors
    /// - [`CurveError::ReducedLengthMismatch`] if `free` does not match
    ///   the spec.
    /// - Yield root-finder errors under [`LossSpace::Yield`].
    pub fn loss(&self, free: &Theta) -> CurveResult<f64> {
        let params = self.spec.expand(free)?;
        let mut sum = 0.0;
        for (i, bond) in self.bonds.iter().enumerate() {
            let fitted_price = price_bond(bond, &params);
            let fitted = match self.space {
                LossSpace::Price => fitted_price,
                LossSpace::Yield => {
                    let times = cashflow_times(bond.maturity);
                    yield_to_maturity(fitted_price, bond.coupon, &times, YTM_GUESS, YTM_TOL)?
                }
            };
            let err = fitted - bond.observed;
            sum += self.weights.at(i) * err * err;
        }
        Ok(1.0 + 100.0 * sum)
    }
}

impl Objective for PricingLoss<'_> {
    fn evaluate(&self, theta: &Theta) -> OptResult<f64> {
        self.loss(theta).map_err(|err| OptError::BackendError { text: err.to_string() })
    }
}
