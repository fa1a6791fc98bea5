//! lstar::estimator — grid-initialized nonlinear estimation of the
//! transition parameters with full diagnostics.
//!
//! Purpose
//! -------
//! Drive the outer LSTAR search: prune the sample, scan the
//! `γ × c` candidate grid for a warm start, refine the free transition
//! parameters with the matching optimizer (multivariate, univariate, or
//! none), and assemble the diagnostic bundle plus per-regressor regime
//! contrasts at the optimum.
//!
//! Key behaviors
//! -------------
//! - Grid cells store raw sse; the argmin cell is the first occurrence
//!   in row-major scan order on exact ties.
//! - Both transition parameters free ⇒ Nelder–Mead from the warm-start
//!   cell; exactly one free ⇒ golden-section over that grid's
//!   `[min, max]` range; none free ⇒ closed-form profiled fit.
//! - Non-convergence is an outcome (`converged == false`, no details),
//!   optionally warned to stderr, never an error.
use crate::lstar::errors::{LstarError, LstarResult};
use crate::lstar::loss::{TransitionFitDetails, TransitionLoss};
use crate::lstar::profile::{EstimationKind, GcSpec};
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::golden_section::{run_golden_section, ScalarObjective};
use crate::optimization::grid::grid_search;
use crate::optimization::nelder_mead::{run_nelder_mead, Objective};
use crate::optimization::options::MinimizeOptions;
use crate::optimization::outcome::Theta;
use crate::utils::excise;
use ndarray::{array, Array1, Array2};
use statrs::function::erf::erfc;

/// Simplex/interval tolerance for the transition-parameter search.
pub const LSTAR_TOL: f64 = 1e-6;
/// Iteration budget for the transition-parameter search.
pub const LSTAR_MAX_ITER: usize = 10_000;

/// Configuration of one LSTAR estimation run.
#[derive(Debug, Clone, PartialEq)]
pub struct LstarConfig {
    /// Candidate transition slopes for the warm-start grid.
    pub gamma_grid: Vec<f64>,
    /// Candidate transition locations for the warm-start grid.
    pub c_grid: Vec<f64>,
    pub spec: GcSpec,
    /// Newey–West bandwidth for the sandwich covariance.
    pub nw_lags: usize,
    /// Print a warning to stderr when the optimizer exhausts its budget.
    pub verbose: bool,
}

/// Slope difference between the two regimes for one switching
/// regressor, with its sandwich-based test statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeContrast {
    /// `b_regime2_j − b_regime1_j`.
    pub diff: f64,
    pub std_error: f64,
    pub t_stat: f64,
    /// Two-sided standard-normal p-value.
    pub p_value: f64,
}

/// Outcome of an LSTAR estimation run.
#[derive(Debug, Clone)]
pub struct LstarFit {
    pub converged: bool,
    /// Present only when the search converged.
    pub details: Option<TransitionFitDetails>,
    /// One contrast per switching regressor column; empty when the
    /// search did not converge.
    pub contrasts: Vec<RegimeContrast>,
    /// Raw sse surface over `gamma_grid × c_grid`.
    pub sse_grid: Array2<f64>,
    /// Warm-start cell selected from the grid.
    pub warm_start: (f64, f64),
    pub iterations: usize,
    pub status: String,
}

struct UnivariateLoss<'a, 'b> {
    loss: &'b TransitionLoss<'a>,
}

impl ScalarObjective for UnivariateLoss<'_, '_> {
    fn evaluate(&self, x: f64) -> OptResult<f64> {
        Objective::evaluate(self.loss, &array![x])
    }
}

/// Estimate an LSTAR model on a jointly aligned sample.
///
/// # Arguments
/// - `y`: dependent variable.
/// - `x0`: regime-switching regressors, n×k.
/// - `w`: regime-invariant regressors, n×kw (kw may be 0).
/// - `z`: transition driver.
/// NaN-bearing rows are excised jointly across all four before any
/// estimation.
///
/// # Errors
/// - [`LstarError::InvalidSample`] for misaligned inputs or an empty
///   post-pruning sample.
/// - Hard errors from the grid scan, optimizer, OLS, or sandwich step.
pub fn estimate_lstar(
    y: &Array1<f64>, x0: &Array2<f64>, w: &Array2<f64>, z: &Array1<f64>, config: &LstarConfig,
) -> LstarResult<LstarFit> {
    let sample = excise(y, x0, w, z)
        .ok_or(LstarError::InvalidSample { reason: "input arrays are not row-aligned" })?;
    if sample.n == 0 {
        return Err(LstarError::InvalidSample { reason: "no rows survive NaN pruning" });
    }

    let loss = TransitionLoss {
        y: &sample.y,
        x0: &sample.x,
        w: &sample.w,
        z: &sample.z,
        spec: config.spec,
    };

    // Warm-start scan; fixed slots override the grid candidate.
    let grid = grid_search(&config.gamma_grid, &config.c_grid, |g, c| {
        let free = config.spec.free_from(g, c);
        loss.sse(&free).map_err(|err| OptError::BackendError { text: err.to_string() })
    })?;
    let warm_gamma = config.gamma_grid[grid.min_i];
    let warm_c = config.c_grid[grid.min_j];

    let opts = MinimizeOptions::new(LSTAR_TOL, LSTAR_MAX_ITER, config.verbose)?;
    let (free_hat, converged, iterations, status) = match config.spec.kind() {
        EstimationKind::NeitherEstimated => {
            (Some(Array1::<f64>::zeros(0)), true, 0, "NoFreeTransitionParameters".to_string())
        }
        EstimationKind::BothEstimated => {
            let outcome = run_nelder_mead(&loss, &array![warm_gamma, warm_c], &opts)?;
            unpack(outcome)
        }
        EstimationKind::GammaOnly => {
            refine_univariate(&loss, &config.gamma_grid, warm_gamma, &opts)?
        }
        EstimationKind::COnly => refine_univariate(&loss, &config.c_grid, warm_c, &opts)?,
    };

    let free_hat = match (converged, free_hat) {
        (true, Some(free)) => free,
        _ => {
            if config.verbose {
                eprintln!(
                    "warning: LSTAR estimation did not converge after {iterations} iterations \
                     ({status})"
                );
            }
            return Ok(LstarFit {
                converged: false,
                details: None,
                contrasts: Vec::new(),
                sse_grid: grid.losses,
                warm_start: (warm_gamma, warm_c),
                iterations,
                status,
            });
        }
    };

    let details = loss.details(&free_hat, config.nw_lags)?;
    let contrasts = regime_contrasts(&details, config.spec.free_len(), sample.x.ncols());

    Ok(LstarFit {
        converged: true,
        details: Some(details),
        contrasts,
        sse_grid: grid.losses,
        warm_start: (warm_gamma, warm_c),
        iterations,
        status,
    })
}

// ---- Helper methods ----

type RefineResult = (Option<Theta>, bool, usize, String);

fn unpack(outcome: crate::optimization::outcome::MinimizeOutcome) -> RefineResult {
    let converged = outcome.converged;
    (Some(outcome.theta_hat), converged, outcome.iterations, outcome.status)
}

/// Golden-section refinement of the single free slot over its grid
/// range. A degenerate single-point grid skips the search.
fn refine_univariate(
    loss: &TransitionLoss<'_>, grid: &[f64], init: f64, opts: &MinimizeOptions,
) -> LstarResult<RefineResult> {
    let lo = grid.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = grid.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if lo >= hi {
        return Ok((Some(array![init]), true, 0, "DegenerateGridRange".to_string()));
    }
    let scalar = UnivariateLoss { loss };
    let outcome = run_golden_section(&scalar, lo, hi, init.clamp(lo, hi), opts)?;
    Ok(unpack(outcome))
}

/// Per-regressor regime contrasts from the sandwich covariance.
///
/// For column `j` the contrast vector selects `b_regime2_j − b_regime1_j`
/// in the full theta layout, so `Var = r'Σr` expands to the usual
/// two-variance-minus-covariance form.
fn regime_contrasts(
    details: &TransitionFitDetails, ngc: usize, k: usize,
) -> Vec<RegimeContrast> {
    let mut contrasts = Vec::with_capacity(k);
    for j in 0..k {
        let i1 = ngc + j;
        let i2 = ngc + k + j;
        let diff = details.theta[i2] - details.theta[i1];
        let var = details.cov_theta[[i2, i2]] + details.cov_theta[[i1, i1]]
            - 2.0 * details.cov_theta[[i1, i2]];
        let std_error = if var >= 0.0 { var.sqrt() } else { f64::NAN };
        let t_stat = diff / std_error;
        let p_value = erfc(t_stat.abs() / std::f64::consts::SQRT_2);
        contrasts.push(RegimeContrast { diff, std_error, t_stat, p_value });
    }
    contrasts
}
