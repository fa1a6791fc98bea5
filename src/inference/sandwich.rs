//! inference::sandwich — GMM sandwich covariance for moment-based estimators.
//!
//! Purpose
//! -------
//! Assemble the sandwich covariance `Cov(θ̂) = J⁻¹ S J⁻ᵀ / T` for an
//! estimator defined through a `T×p` moment matrix, where `J` is the
//! Jacobian of the mean moment vector with respect to the parameters and
//! `S` is the long-run covariance of the moment series from
//! [`long_run_variance`].
//!
//! Key behaviors
//! -------------
//! - Differentiate the mean moment map numerically via central
//!   differences, falling back to forward differences when the central
//!   stencil produces non-finite entries.
//! - Invert `J` through its singular value decomposition; a singular
//!   value at or below [`SINGULAR_EPS`] is reported as
//!   [`InferenceError::SingularJacobian`] rather than silently truncated.
//! - Return the full `p×p` covariance matrix so callers can form both
//!   standard errors and linear-combination variances (e.g. contrasts).
//!
//! Conventions
//! -----------
//! - The moment map `f` must return the *mean* moments `ḡ(θ)` (averaged
//!   over observations), matching the scale on which `S` is built.
//! - All matrices are `ndarray` on the public surface; `nalgebra` is used
//!   internally for the decomposition.
use crate::inference::{
    errors::{InferenceError, InferenceResult},
    longrun::long_run_variance,
};
use finitediff::FiniteDiff;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Singular values at or below this floor mark the moment Jacobian as
/// numerically rank deficient.
pub const SINGULAR_EPS: f64 = 1e-12;

/// sandwich_covariance — full GMM sandwich covariance of `θ̂`.
///
/// Purpose
/// -------
/// Combine the numeric Jacobian of the mean moment map with the long-run
/// covariance of the moment series into `Cov(θ̂) = J⁻¹ S J⁻ᵀ / T`.
///
/// Parameters
/// ----------
/// - `f`: mean moment map `θ ↦ ḡ(θ)`, averaged over the `T` rows that
///   produced `moments`. Must be C¹ near `theta_hat`.
/// - `theta_hat`: length-`p` parameter vector at which the Jacobian is
///   evaluated.
/// - `moments`: `T×p` per-observation moment matrix evaluated at
///   `theta_hat`.
/// - `bandwidth`: Bartlett lag window for `S`; `0` yields the White
///   (heteroskedasticity-only) estimate.
///
/// Returns
/// -------
/// `InferenceResult<Array2<f64>>`
///   The `p×p` covariance matrix of `θ̂` on success.
///
/// Errors
/// ------
/// - [`InferenceError::EmptyMomentMatrix`] / `BandwidthTooLarge` from the
///   long-run variance step.
/// - [`InferenceError::JacobianDimMismatch`] or `InvalidJacobian` when
///   the numeric Jacobian is malformed even after the forward-difference
///   fallback.
/// - [`InferenceError::SingularJacobian`] when `J` is numerically rank
///   deficient.
pub fn sandwich_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, moments: &Array2<f64>, bandwidth: usize,
) -> InferenceResult<Array2<f64>> {
    let p = theta_hat.len();
    let t = moments.nrows() as f64;

    let s = long_run_variance(moments, bandwidth)?;
    let jac = compute_moment_jacobian(f, theta_hat)?;
    let j_inv = invert_jacobian(&jac, p)?;

    let mut s_nalg = DMatrix::<f64>::zeros(p, p);
    fill_dmatrix(&s, &mut s_nalg);

    let cov_nalg = (&j_inv * s_nalg * j_inv.transpose()) / t;

    let mut cov = Array2::<f64>::zeros((p, p));
    for i in 0..p {
        for j in 0..p {
            cov[[i, j]] = cov_nalg[(i, j)];
        }
    }
    Ok(cov)
}

/// std_errors_from_covariance — square roots of the covariance diagonal.
///
/// Negative diagonal entries (possible under severe numerical noise) are
/// mapped to `NaN` rather than panicking, so callers can surface them.
pub fn std_errors_from_covariance(cov: &Array2<f64>) -> Array1<f64> {
    let p = cov.nrows();
    let mut se = Array1::<f64>::zeros(p);
    for i in 0..p {
        let v = cov[[i, i]];
        se[i] = if v >= 0.0 { v.sqrt() } else { f64::NAN };
    }
    se
}

// ---- Helper methods ----

/// compute_moment_jacobian — numeric Jacobian of the mean moment map.
///
/// Central differences are attempted first; when the resulting matrix
/// fails validation (wrong shape or non-finite entries), the forward
/// stencil is used instead and validated in turn.
fn compute_moment_jacobian<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> InferenceResult<Array2<f64>> {
    let dim = theta_hat.len();
    let cent_jac = theta_hat.central_jacobian(f);
    match validate_jacobian(&cent_jac, dim) {
        Ok(_) => Ok(cent_jac),
        Err(_) => {
            let forward_jac = theta_hat.forward_jacobian(f);
            validate_jacobian(&forward_jac, dim)?;
            Ok(forward_jac)
        }
    }
}

/// validate_jacobian — shape and finiteness checks for a `p×p` Jacobian.
fn validate_jacobian(jac: &Array2<f64>, dim: usize) -> InferenceResult<()> {
    if jac.nrows() != dim || jac.ncols() != dim {
        return Err(InferenceError::JacobianDimMismatch {
            expected: (dim, dim),
            found: (jac.nrows(), jac.ncols()),
        });
    }
    for ((row, col), &value) in jac.indexed_iter() {
        if !value.is_finite() {
            return Err(InferenceError::InvalidJacobian { row, col, value });
        }
    }
    Ok(())
}

/// invert_jacobian — SVD-based inverse with a rank-deficiency floor.
///
/// The Jacobian of a mean moment map is square but not symmetric in
/// general, so the symmetric eigendecomposition used elsewhere does not
/// apply; the SVD handles the general case and exposes the smallest
/// singular value for the singularity check.
fn invert_jacobian(jac: &Array2<f64>, p: usize) -> InferenceResult<DMatrix<f64>> {
    let mut jac_nalg = DMatrix::<f64>::zeros(p, p);
    fill_dmatrix(jac, &mut jac_nalg);

    let svd = jac_nalg.svd(true, true);
    let smallest_singular_value =
        svd.singular_values.iter().cloned().fold(f64::INFINITY, f64::min);
    if smallest_singular_value <= SINGULAR_EPS {
        return Err(InferenceError::SingularJacobian { smallest_singular_value });
    }
    svd.pseudo_inverse(SINGULAR_EPS)
        .map_err(|_| InferenceError::SingularJacobian { smallest_singular_value })
}

/// fill_dmatrix — copy an `ndarray` matrix into a preallocated `DMatrix`.
///
/// Column-major traversal to match `DMatrix` storage. No symmetry is
/// assumed or imposed.
fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    for j in 0..src.ncols() {
        for i in 0..src.nrows() {
            dst[(i, j)] = src[[i, j]];
        }
    }
}
