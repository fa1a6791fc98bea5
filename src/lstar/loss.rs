//! lstar::loss — profiled least-squares loss for the transition
//! regression, with optional inference diagnostics.
//!
//! Purpose
//! -------
//! Evaluate the LSTAR objective at a candidate free `(γ, c)` vector:
//! resolve the transition parameters through the keep specification,
//! weight the switching regressors by `G` and `1 − G`, profile out the
//! linear coefficients with an embedded OLS fit, and report the residual
//! sum of squares. The optimizer sees the conditioned scalar
//! `1.0 + 100·sse`; the raw magnitude is not part of the API.
//!
//! Key behaviors
//! -------------
//! - `details` re-runs the profiled fit at a candidate and assembles the
//!   full diagnostic bundle: resolved `(γ, c)`, transition weights,
//!   coefficients, GMM sandwich covariance and standard errors for the
//!   whole estimated parameter vector, OLS standard errors for the
//!   linear block, adjusted R², and the observation count.
//! - `sse` survives saturated transitions through a minimum-norm solve,
//!   so grid scans stay finite; `details` needs an identified design,
//!   so rank deficiency and singular moment Jacobians surface there.
use crate::inference::sandwich::{sandwich_covariance, std_errors_from_covariance};
use crate::lstar::errors::LstarResult;
use crate::lstar::moments::MomentContext;
use crate::lstar::profile::GcSpec;
use crate::lstar::transition::transition_weights;
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::nelder_mead::Objective;
use crate::optimization::outcome::Theta;
use crate::regression::errors::RegressionError;
use crate::regression::ols::{ols, pinv_gram};
use ndarray::{concatenate, Array1, Array2, Axis};

/// Transition-regression loss over a fixed, already-pruned sample.
pub struct TransitionLoss<'a> {
    pub y: &'a Array1<f64>,
    /// Regime-switching regressors, n×k.
    pub x0: &'a Array2<f64>,
    /// Regime-invariant regressors, n×kw (kw may be 0).
    pub w: &'a Array2<f64>,
    /// Transition driver, length n.
    pub z: &'a Array1<f64>,
    pub spec: GcSpec,
}

/// Diagnostic bundle from a detailed loss evaluation.
#[derive(Debug, Clone)]
pub struct TransitionFitDetails {
    pub sse: f64,
    /// Resolved (canonicalized) transition slope.
    pub gamma: f64,
    /// Resolved transition location.
    pub c: f64,
    /// Full estimated parameter vector `[free (γ,c) slots, b]`.
    pub theta: Array1<f64>,
    /// Linear coefficients `[b_regime1, b_regime2, b_w]`.
    pub coefficients: Array1<f64>,
    /// Transition weights `G_t`, length n.
    pub transition: Array1<f64>,
    /// Sandwich covariance of `theta`, p×p.
    pub cov_theta: Array2<f64>,
    /// Sandwich standard errors of `theta`.
    pub std_theta: Array1<f64>,
    /// Classical OLS standard errors of the linear block.
    pub std_b_ols: Array1<f64>,
    pub r2_adj: f64,
    pub n: usize,
}

impl TransitionLoss<'_> {
    /// Effective design `[x0·(1−G), x0·G, w]` for resolved `(γ, c)`.
    pub fn design(&self, gamma: f64, c: f64) -> (Array2<f64>, Array1<f64>) {
        let g = transition_weights(self.z, gamma, c);
        let low = self.x0 * &(1.0 - &g).insert_axis(Axis(1));
        let high = self.x0 * &g.clone().insert_axis(Axis(1));
        let design = concatenate![Axis(1), low, high, self.w.clone()];
        (design, g)
    }

    /// Residual sum of squares at a free `(γ, c)` vector.
    ///
    /// A saturated transition (G pinned at 0 or 1 over the whole
    /// sample) zeroes one regime block of the design, so the plain OLS
    /// solve reports rank deficiency. The residuals are still well
    /// defined there, and the fit collapses to single-regime OLS on
    /// `[x0, w]`; the minimum-norm solve recovers exactly that, which
    /// keeps the loss finite across the whole `(γ, c)` grid.
    ///
    /// # Errors
    /// - Keep-specification mismatches from the profiler.
    pub fn sse(&self, free: &Theta) -> LstarResult<f64> {
        let (gamma, c) = self.spec.resolve(free)?;
        let (design, _) = self.design(gamma, c);
        match ols(self.y, &design) {
            Ok(fit) => Ok(fit.residuals.dot(&fit.residuals)),
            Err(RegressionError::RankDeficient { .. }) => {
                let b = pinv_gram(&design.t().dot(&design)).dot(&design.t().dot(self.y));
                let residuals = self.y - &design.dot(&b);
                Ok(residuals.dot(&residuals))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The conditioned scalar the optimizer minimizes.
    pub fn loss(&self, free: &Theta) -> LstarResult<f64> {
        Ok(1.0 + 100.0 * self.sse(free)?)
    }

    /// Full diagnostic evaluation at a free `(γ, c)` vector.
    ///
    /// # Errors
    /// - Everything `sse` can raise, plus singular-Jacobian and
    ///   long-run-variance failures from the sandwich step.
    pub fn details(&self, free: &Theta, nw_lags: usize) -> LstarResult<TransitionFitDetails> {
        let (gamma, c) = self.spec.resolve(free)?;
        let (design, transition) = self.design(gamma, c);
        let fit = ols(self.y, &design)?;

        let mut theta = Vec::with_capacity(self.spec.free_len() + fit.coefficients.len());
        theta.extend(self.spec.free_from(gamma, c).iter());
        theta.extend(fit.coefficients.iter());
        let theta = Array1::from(theta);

        let ctx = MomentContext { y: self.y, x0: self.x0, w: self.w, z: self.z, spec: self.spec };
        let moments = ctx.matrix_at(&theta)?;
        let p = ctx.param_len();
        let mean_moments = |point: &Array1<f64>| -> Array1<f64> {
            ctx.mean_at(point).unwrap_or_else(|_| Array1::from_elem(p, f64::NAN))
        };
        let cov_theta = sandwich_covariance(&mean_moments, &theta, &moments, nw_lags)?;
        let std_theta = std_errors_from_covariance(&cov_theta);

        let sse = fit.residuals.dot(&fit.residuals);
        Ok(TransitionFitDetails {
            sse,
            gamma,
            c,
            theta,
            coefficients: fit.coefficients.clone(),
            transition,
            cov_theta,
            std_theta,
            std_b_ols: fit.std_errors(),
            r2_adj: fit.r2_adj,
            n: fit.n,
        })
    }
}

impl Objective for TransitionLoss<'_> {
    fn evaluate(&self, theta: &Theta) -> OptResult<f64> {
        self.loss(theta).map_err(|err| OptError::BackendError { text: err.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lstar::profile::GcSlot;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Degeneration to single-regime OLS when G is forced flat or
    //   saturated.
    // - The near-zero sse of an exactly linear relationship.
    // - Diagnostic bundle shapes and the first-order-condition sanity
    //   of the detailed evaluation.
    // -------------------------------------------------------------------------

    fn linear_sample(n: usize) -> (Array1<f64>, Array2<f64>, Array2<f64>, Array1<f64>) {
        let z = Array1::from_iter((0..n).map(|t| -2.0 + 4.0 * (t as f64) / (n as f64 - 1.0)));
        let x0 = concatenate![
            Axis(1),
            Array2::from_elem((n, 1), 1.0),
            z.clone().insert_axis(Axis(1))
        ];
        let w = Array2::<f64>::zeros((n, 0));
        let y = z.clone();
        (y, x0, w, z)
    }

    #[test]
    // Purpose
    // -------
    // When the data carry no regime switch, the profiled fit must
    // collapse to the single-regime OLS solution: equal coefficients in
    // both regime blocks and the plain OLS sse.
    //
    // Given
    // -----
    // - y exactly linear in z; fixed (γ, c) = (5, 2) so regime 1 is
    //   active over most of the sample but the design stays full rank.
    //
    // Expect
    // ------
    // - sse ≈ plain OLS sse of y on x0 ≈ 0 (b1 = b2 = the OLS slope
    //   reproduces y for any transition path).
    fn no_switch_data_degenerates_to_single_regime_ols() {
        let (y, x0, w, z) = linear_sample(30);
        let spec = GcSpec { gamma: GcSlot::Fixed(5.0), c: GcSlot::Fixed(2.0) };
        let loss = TransitionLoss { y: &y, x0: &x0, w: &w, z: &z, spec };

        let sse = loss.sse(&array![]).unwrap();
        let plain = ols(&y, &x0).unwrap();
        let plain_sse = plain.residuals.dot(&plain.residuals);
        assert_relative_eq!(sse, plain_sse, epsilon = 1e-10);
        assert!(sse < 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // A transition saturated far outside the driver's range zeroes the
    // high-regime block, which makes the effective design rank
    // deficient. The loss must not error there: it collapses to the
    // single-regime OLS fit on `[x0, w]`.
    //
    // Given
    // -----
    // - z ∈ [−2, 2] with fixed (γ, c) = (30, 10), so G underflows to 0
    //   at every observation; y carries a quadratic term x0 cannot
    //   absorb, so the OLS residual is strictly positive.
    //
    // Expect
    // ------
    // - sse and loss finite, with sse equal to the plain OLS sse of y
    //   on x0.
    fn saturated_transition_degenerates_to_single_regime_ols() {
        let n = 40;
        let z = Array1::from_iter((0..n).map(|t| -2.0 + 4.0 * (t as f64) / (n as f64 - 1.0)));
        let x0 = concatenate![
            Axis(1),
            Array2::from_elem((n, 1), 1.0),
            z.clone().insert_axis(Axis(1))
        ];
        let w = Array2::<f64>::zeros((n, 0));
        let y = z.mapv(|v| 0.5 + 1.5 * v + 0.1 * v * v);

        let spec = GcSpec { gamma: GcSlot::Fixed(30.0), c: GcSlot::Fixed(10.0) };
        let loss = TransitionLoss { y: &y, x0: &x0, w: &w, z: &z, spec };

        let sse = loss.sse(&array![]).unwrap();
        let plain = ols(&y, &x0).unwrap();
        let plain_sse = plain.residuals.dot(&plain.residuals);
        assert!(sse.is_finite() && sse > 0.0);
        assert_relative_eq!(sse, plain_sse, epsilon = 1e-10);
        assert_relative_eq!(loss.loss(&array![]).unwrap(), 1.0 + 100.0 * sse, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // The conditioned loss must sit on its floor when the regression is
    // exact, and the scaling must be the documented affine map of sse.
    //
    // Given
    // -----
    // - The same exactly linear sample with both (γ, c) free at a
    //   moderate candidate.
    //
    // Expect
    // ------
    // - loss == 1 + 100·sse, and ≈ 1 for the exact fit.
    fn loss_is_affine_in_sse() {
        let (y, x0, w, z) = linear_sample(30);
        let spec = GcSpec { gamma: GcSlot::Estimate, c: GcSlot::Estimate };
        let loss = TransitionLoss { y: &y, x0: &x0, w: &w, z: &z, spec };

        let free = array![1.0, 0.0];
        let sse = loss.sse(&free).unwrap();
        assert_relative_eq!(loss.loss(&free).unwrap(), 1.0 + 100.0 * sse, epsilon = 1e-12);
        assert!(sse < 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // The diagnostic bundle must be internally consistent: parameter
    // vector layout, covariance shape, positive diagonal, and moment
    // means near zero at the profiled optimum.
    //
    // Given
    // -----
    // - A two-regime sample y = 1 + z (low regime) switching to
    //   y = 3 + 2z, with (γ, c) fixed at the generating values.
    //
    // Expect
    // ------
    // - theta = [b] of length 4, 4×4 covariance, finite positive SEs,
    //   adjusted R² close to 1.
    fn details_bundle_is_consistent_on_two_regime_data() {
        let n = 60;
        let z = Array1::from_iter((0..n).map(|t| -3.0 + 6.0 * (t as f64) / (n as f64 - 1.0)));
        let x0 = concatenate![
            Axis(1),
            Array2::from_elem((n, 1), 1.0),
            z.clone().insert_axis(Axis(1))
        ];
        let w = Array2::<f64>::zeros((n, 0));
        let g_true = transition_weights(&z, 4.0, 0.0);
        let low = z.mapv(|v| 1.0 + v);
        let high = z.mapv(|v| 3.0 + 2.0 * v);
        // Small deterministic ripple so the fit is not exactly singular.
        let noise = Array1::from_iter((0..n).map(|t| 1e-3 * ((t as f64) * 0.7).sin()));
        let y = &low * &(1.0 - &g_true) + &high * &g_true + &noise;

        let spec = GcSpec { gamma: GcSlot::Fixed(4.0), c: GcSlot::Fixed(0.0) };
        let loss = TransitionLoss { y: &y, x0: &x0, w: &w, z: &z, spec };
        let details = loss.details(&array![], 2).unwrap();

        assert_eq!(details.theta.len(), 4);
        assert_eq!(details.cov_theta.shape(), &[4, 4]);
        assert_eq!(details.std_theta.len(), 4);
        assert_eq!(details.std_b_ols.len(), 4);
        assert_eq!(details.n, n);
        assert!(details.r2_adj > 0.999);
        for i in 0..4 {
            assert!(details.std_theta[i].is_finite() && details.std_theta[i] >= 0.0);
        }
        // The regime contrast in the slope is recovered.
        assert_relative_eq!(details.coefficients[3] - details.coefficients[1], 1.0, epsilon = 1e-2);
    }
}
