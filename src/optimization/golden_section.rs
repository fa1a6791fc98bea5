//! Bounded univariate minimization via golden-section search.
//!
//! Used by the LSTAR estimator when exactly one of the transition
//! parameters is free: the search is confined to the `[min, max]` range
//! of the corresponding warm-start grid.
use crate::optimization::{
    errors::{OptError, OptResult},
    options::MinimizeOptions,
    outcome::MinimizeOutcome,
};
use argmin::core::{CostFunction, Error, Executor, State};
use argmin::solver::goldensectionsearch::GoldenSectionSearch;
use ndarray::Array1;

/// User-implemented loss interface for the univariate search.
pub trait ScalarObjective {
    fn evaluate(&self, x: f64) -> OptResult<f64>;
}

struct ScalarAdapter<'a, F: ScalarObjective> {
    f: &'a F,
}

impl<F: ScalarObjective> CostFunction for ScalarAdapter<'_, F> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.f.evaluate(*x)?;
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { value }).into());
        }
        Ok(value)
    }
}

/// Minimize `f` over the closed interval `[lo, hi]`.
///
/// # Behavior
/// - Starts the golden-section bracket at `init` (clamped to the
///   interval by the caller; typically the warm-start grid cell).
/// - Runs with interval tolerance `opts.tol` and iteration cap
///   `opts.max_iter`.
/// - The scalar solution is returned as a length-1 `theta_hat` so both
///   drivers share [`MinimizeOutcome`].
///
/// # Errors
/// - [`OptError::InvalidBounds`] when `lo >= hi`.
/// - Propagates objective and Argmin errors as in the multivariate
///   driver.
pub fn run_golden_section<F: ScalarObjective>(
    f: &F, lo: f64, hi: f64, init: f64, opts: &MinimizeOptions,
) -> OptResult<MinimizeOutcome> {
    if !(lo < hi) {
        return Err(OptError::InvalidBounds { lo, hi });
    }
    let problem = ScalarAdapter { f };
    let solver = GoldenSectionSearch::new(lo, hi)?.with_tolerance(opts.tol)?;

    let executor = Executor::new(problem, solver)
        .configure(|state| state.param(init).max_iters(opts.max_iter as u64));
    let mut result = executor.run()?.state().clone();

    let iterations = result.get_iter();
    let termination = result.get_termination_status().clone();
    let best_cost = result.get_best_cost();
    let best = result.take_best_param().map(|x| Array1::from(vec![x]));
    MinimizeOutcome::new(best, best_cost, termination, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Parabola;

    impl ScalarObjective for Parabola {
        fn evaluate(&self, x: f64) -> OptResult<f64> {
            Ok((x - 0.7) * (x - 0.7) + 3.0)
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the bounded search locates an interior minimum.
    //
    // Given
    // -----
    // - f(x) = (x − 0.7)² + 3 over [0, 2], started at 1.0.
    //
    // Expect
    // ------
    // - x̂ ≈ 0.7 to 1e-4 and the minimum value ≈ 3.
    fn golden_section_finds_interior_minimum() {
        let opts = MinimizeOptions::new(1e-8, 1000, false).unwrap();
        let out = run_golden_section(&Parabola, 0.0, 2.0, 1.0, &opts).unwrap();

        assert!(out.converged, "status: {}", out.status);
        assert_relative_eq!(out.theta_hat[0], 0.7, epsilon = 1e-4);
        assert_relative_eq!(out.value, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn golden_section_rejects_degenerate_interval() {
        let opts = MinimizeOptions::default();
        assert!(matches!(
            run_golden_section(&Parabola, 1.0, 1.0, 1.0, &opts),
            Err(OptError::InvalidBounds { .. })
        ));
    }
}
