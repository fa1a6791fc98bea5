//! Multivariate derivative-free minimization via Nelder–Mead.
//!
//! This is the shared driver used by the yield-curve and LSTAR
//! estimators. It wires up:
//! - the user loss via [`ArgminAdapter`],
//! - an Argmin `NelderMead` solver with the configured simplex
//!   standard-deviation tolerance,
//! - an initial simplex built from a single start point,
//! - the iteration budget,
//!   then executes the solver and converts the result into a
//!   [`MinimizeOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    options::MinimizeOptions,
    outcome::{MinimizeOutcome, Theta},
};
use argmin::core::{CostFunction, Error, Executor, State};
use argmin::solver::neldermead::NelderMead;

/// User-implemented loss interface for the vector-valued searches.
///
/// Implementations evaluate the (already scaled) scalar loss at a
/// candidate parameter vector. Domain failures (e.g. a yield
/// root-finder that does not converge) are surfaced as errors, which
/// abort the solver run rather than being swallowed as `NaN`.
pub trait Objective {
    fn evaluate(&self, theta: &Theta) -> OptResult<f64>;
}

/// Bridges an [`Objective`] to Argmin's `CostFunction`.
///
/// The loss is minimized directly; there is no sign flip. Non-finite
/// loss values are rejected at this boundary so the solver never
/// iterates on NaN.
pub struct ArgminAdapter<'a, F: Objective> {
    pub f: &'a F,
}

impl<F: Objective> CostFunction for ArgminAdapter<'_, F> {
    type Param = Theta;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.f.evaluate(theta)?;
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { value }).into());
        }
        Ok(value)
    }
}

/// Relative per-coordinate perturbation used to seed the simplex.
const SIMPLEX_STEP_REL: f64 = 0.05;
/// Absolute perturbation for coordinates that start at zero.
const SIMPLEX_STEP_ABS: f64 = 0.00025;

/// Minimize `f` over the full parameter space from a single start point.
///
/// # Behavior
/// - Builds an initial simplex of `n + 1` vertices: the start point
///   plus one vertex per coordinate, perturbed by 5% of its magnitude
///   (or a small absolute step for zero coordinates).
/// - Runs Nelder–Mead with simplex standard-deviation tolerance
///   `opts.tol` and iteration cap `opts.max_iter`.
/// - Normalizes the final solver state into a [`MinimizeOutcome`];
///   budget exhaustion is reported as `converged == false`, not as an
///   error.
///
/// # Errors
/// - Propagates objective errors raised during solver iterations.
/// - Propagates Argmin construction/runtime errors via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors from [`MinimizeOutcome::new`].
pub fn run_nelder_mead<F: Objective>(
    f: &F, theta0: &Theta, opts: &MinimizeOptions,
) -> OptResult<MinimizeOutcome> {
    let problem = ArgminAdapter { f };
    let solver: NelderMead<Theta, f64> =
        NelderMead::new(build_simplex(theta0)).with_sd_tolerance(opts.tol)?;

    let executor = Executor::new(problem, solver)
        .configure(|state| state.max_iters(opts.max_iter as u64));
    let mut result = executor.run()?.state().clone();

    let iterations = result.get_iter();
    let termination = result.get_termination_status().clone();
    let best_cost = result.get_best_cost();
    MinimizeOutcome::new(result.take_best_param(), best_cost, termination, iterations)
}

// ---- Helper methods ----

/// Build the initial simplex around `theta0`.
///
/// One vertex per free coordinate, each displaced along a single axis.
fn build_simplex(theta0: &Theta) -> Vec<Theta> {
    let n = theta0.len();
    let mut simplex = Vec::with_capacity(n + 1);
    simplex.push(theta0.clone());
    for i in 0..n {
        let mut vertex = theta0.clone();
        vertex[i] = if vertex[i] != 0.0 {
            vertex[i] * (1.0 + SIMPLEX_STEP_REL)
        } else {
            SIMPLEX_STEP_ABS
        };
        simplex.push(vertex);
    }
    simplex
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    struct Quadratic {
        center: Theta,
    }

    impl Objective for Quadratic {
        fn evaluate(&self, theta: &Theta) -> OptResult<f64> {
            let d = theta - &self.center;
            Ok(d.dot(&d))
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the driver finds the minimum of a smooth quadratic
    // bowl and reports convergence.
    //
    // Given
    // -----
    // - f(θ) = ||θ − (1, −2)||² started from the origin.
    //
    // Expect
    // ------
    // - θ̂ ≈ (1, −2) to 1e-4 and `converged == true`.
    fn nelder_mead_minimizes_quadratic_bowl() {
        // Arrange
        let f = Quadratic { center: array![1.0, -2.0] };
        let theta0 = array![0.0, 0.0];
        let opts = MinimizeOptions::new(1e-12, 10_000, false).unwrap();

        // Act
        let out = run_nelder_mead(&f, &theta0, &opts).expect("quadratic should minimize");

        // Assert
        assert!(out.converged, "status: {}", out.status);
        assert_relative_eq!(out.theta_hat[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(out.theta_hat[1], -2.0, epsilon = 1e-4);
        assert!(out.value < 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Confirm that exhausting the iteration budget is reported as a
    // non-converged outcome rather than an error.
    //
    // Given
    // -----
    // - The same quadratic with a budget of 2 iterations.
    //
    // Expect
    // ------
    // - `Ok` outcome with `converged == false`.
    fn nelder_mead_budget_exhaustion_is_not_an_error() {
        let f = Quadratic { center: array![10.0, 10.0] };
        let theta0 = array![0.0, 0.0];
        let opts = MinimizeOptions::new(1e-16, 2, false).unwrap();

        let out = run_nelder_mead(&f, &theta0, &opts).unwrap();
        assert!(!out.converged);
    }

    #[test]
    fn simplex_has_full_dimension() {
        let theta0 = array![1.0, 0.0, -3.0];
        let simplex = build_simplex(&theta0);
        assert_eq!(simplex.len(), 4);
        assert_eq!(simplex[0], theta0);
        assert_relative_eq!(simplex[1][0], 1.05, epsilon = 1e-12);
        assert_relative_eq!(simplex[2][1], SIMPLEX_STEP_ABS, epsilon = 1e-15);
        assert_relative_eq!(simplex[3][2], -3.15, epsilon = 1e-12);
    }
}
