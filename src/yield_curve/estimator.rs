//! yield_curve::estimator — nonlinear least-squares curve fitting.
//!
//! Purpose
//! -------
//! Drive the Nelder–Mead search over the free parameter slots of a
//! [`CurveSpec`], starting from a caller-supplied full parameter guess.
//! Non-convergence within the iteration budget is a reportable outcome,
//! not an error: the fit carries `converged == false` and no estimate,
//! and callers must check before use.
use crate::optimization::nelder_mead::run_nelder_mead;
use crate::optimization::options::MinimizeOptions;
use crate::yield_curve::bond::Bond;
use crate::yield_curve::errors::{CurveError, CurveResult};
use crate::yield_curve::loss::{LossSpace, PricingLoss, Weights};
use crate::yield_curve::params::{CurveParams, CurveSpec};

/// Simplex standard-deviation tolerance for the curve search.
///
/// The scaled loss sits on a floor of 1.0, where the cost resolution is
/// about 2.2e-16; a looser tolerance would stop the simplex while the
/// parameters are still several 1e-6 away from the optimum.
pub const CURVE_TOL: f64 = 1e-15;
/// Iteration budget for the curve search.
pub const CURVE_MAX_ITER: usize = 10_000;
/// Cap on simplex restarts from the incumbent best.
pub const CURVE_MAX_RESTARTS: usize = 20;

/// Configuration of one curve estimation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFitConfig {
    pub spec: CurveSpec,
    pub space: LossSpace,
    pub weights: Weights,
    /// Print a warning to stderr when the optimizer exhausts its budget.
    pub verbose: bool,
}

/// Outcome of a curve estimation run.
///
/// `estimate` is present only when the optimizer converged; the sign
/// convention and any short-rate restriction are already applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit {
    pub estimate: Option<CurveParams>,
    pub converged: bool,
    /// Best (scaled) loss value reached.
    pub loss: f64,
    pub iterations: usize,
    pub status: String,
}

/// Fit the curve to a bond sample from an initial full-parameter guess.
///
/// # Behavior
/// - Projects `par0` onto the free slots of the spec (dropping `b1`
///   under the restriction), then minimizes the pricing loss with
///   tolerance [`CURVE_TOL`] and budget [`CURVE_MAX_ITER`], restarting
///   the simplex from the incumbent best (at most
///   [`CURVE_MAX_RESTARTS`] times) while the loss keeps improving.
/// - On convergence, expands the solution back to a full parameter set,
///   which applies `|b0|`, `|tau|` (and `|tau2|`) and rederives `b1`.
/// - On budget exhaustion, returns `converged == false` with
///   `estimate == None` and optionally warns on stderr.
///
/// # Errors
/// - [`CurveError::EmptySample`] / weight-length mismatches before any
///   optimization.
/// - Hard optimizer failures (invalid state, non-finite loss) via
///   [`CurveError::Optimization`].
pub fn estimate_curve(
    par0: &CurveParams, bonds: &[Bond], config: &CurveFitConfig,
) -> CurveResult<CurveFit> {
    if bonds.is_empty() {
        return Err(CurveError::EmptySample);
    }
    config.weights.validate(bonds.len())?;

    let loss = PricingLoss {
        bonds,
        spec: config.spec,
        space: config.space,
        weights: config.weights.clone(),
    };
    let theta0 = config.spec.reduce(par0);
    let opts = MinimizeOptions::new(CURVE_TOL, CURVE_MAX_ITER, config.verbose)?;
    let mut outcome = run_nelder_mead(&loss, &theta0, &opts)?;
    let mut iterations = outcome.iterations;

    // A single simplex can collapse early on the flat scaled surface.
    // Rebuild it around the incumbent best and re-run until the loss
    // stops improving.
    if outcome.converged {
        for _ in 0..CURVE_MAX_RESTARTS {
            let restart = run_nelder_mead(&loss, &outcome.theta_hat, &opts)?;
            iterations += restart.iterations;
            let improved = restart.converged && restart.value < outcome.value;
            if improved {
                outcome = restart;
            }
            if !improved {
                break;
            }
        }
    }
    outcome.iterations = iterations;

    if !outcome.converged {
        if config.verbose {
            eprintln!(
                "warning: curve estimation did not converge after {} iterations ({})",
                outcome.iterations, outcome.status
            );
        }
        return Ok(CurveFit {
            estimate: None,
            converged: false,
            loss: outcome.value,
            iterations: outcome.iterations,
            status: outcome.status,
        });
    }

    let estimate = config.spec.expand(&outcome.theta_hat)?;
    Ok(CurveFit {
        estimate: Some(estimate),
        converged: true,
        loss: outcome.value,
        iterations: outcome.iterations,
        status: outcome.status,
    })
}
