//! lstar::moments — GMM moment conditions for the transition regression.
//!
//! Purpose
//! -------
//! Build the `T×p` moment-condition matrix whose rows are the
//! residual-weighted parameter derivatives
//! `h_t = u_t · [∂ŷ/∂γ, ∂ŷ/∂c, x_t]`, restricted to the parameters
//! actually estimated. The column mean of the matrix is the GMM moment
//! vector, numerically zero at the least-squares optimum; its Jacobian
//! and long-run variance feed the sandwich covariance.
//!
//! Conventions
//! -----------
//! - The full parameter vector is `[free (γ, c) slots, b]` with `b`
//!   ordered `[b_regime1 (k), b_regime2 (k), b_w (kw)]` to match the
//!   effective design `[x0·(1−G), x0·G, w]`.
//! - `∂ŷ/∂γ_t = d_t·G_t(1−G_t)(z_t−c)` and
//!   `∂ŷ/∂c_t = −γ·d_t·G_t(1−G_t)` where `d_t = x0_t·(b2 − b1)` is the
//!   regime coefficient contrast at observation `t`.
use crate::lstar::errors::{LstarError, LstarResult};
use crate::lstar::profile::{GcSlot, GcSpec};
use crate::lstar::transition::{dg_dc, dg_dgamma, logistic_weight};
use ndarray::{Array1, Array2};

/// Fixed sample context the moment map closes over.
///
/// One instance is built per `details` evaluation; `mean_at` is the
/// map the sandwich differentiates numerically.
pub struct MomentContext<'a> {
    pub y: &'a Array1<f64>,
    pub x0: &'a Array2<f64>,
    pub w: &'a Array2<f64>,
    pub z: &'a Array1<f64>,
    pub spec: GcSpec,
}

impl MomentContext<'_> {
    /// Total parameter count `p = free (γ,c) slots + 2k + kw`.
    pub fn param_len(&self) -> usize {
        self.spec.free_len() + 2 * self.x0.ncols() + self.w.ncols()
    }

    /// The `T×p` moment matrix at a full parameter vector.
    ///
    /// # Errors
    /// - [`LstarError::FreeLengthMismatch`] when `theta` does not have
    ///   [`MomentContext::param_len`] entries.
    pub fn matrix_at(&self, theta: &Array1<f64>) -> LstarResult<Array2<f64>> {
        let p = self.param_len();
        if theta.len() != p {
            return Err(LstarError::FreeLengthMismatch { expected: p, found: theta.len() });
        }
        let ngc = self.spec.free_len();
        let k = self.x0.ncols();
        let kw = self.w.ncols();
        let n = self.y.len();

        let gc_free = theta.slice(ndarray::s![..ngc]).to_owned();
        let (gamma, c) = self.spec.resolve(&gc_free)?;
        let b = theta.slice(ndarray::s![ngc..]);

        let mut h = Array2::<f64>::zeros((n, p));
        for t in 0..n {
            let g = logistic_weight(self.z[t], gamma, c);

            // Effective design row and fitted value.
            let mut fitted = 0.0;
            let mut d = 0.0;
            for j in 0..k {
                let x0_tj = self.x0[[t, j]];
                fitted += x0_tj * (1.0 - g) * b[j] + x0_tj * g * b[k + j];
                d += x0_tj * (b[k + j] - b[j]);
            }
            for j in 0..kw {
                fitted += self.w[[t, j]] * b[2 * k + j];
            }
            let u = self.y[t] - fitted;

            let mut col = 0;
            if matches!(self.spec.gamma, GcSlot::Estimate) {
                h[[t, col]] = u * d * dg_dgamma(g, self.z[t], c);
                col += 1;
            }
            if matches!(self.spec.c, GcSlot::Estimate) {
                h[[t, col]] = u * d * dg_dc(g, gamma);
                col += 1;
            }
            for j in 0..k {
                h[[t, col + j]] = u * self.x0[[t, j]] * (1.0 - g);
                h[[t, col + k + j]] = u * self.x0[[t, j]] * g;
            }
            for j in 0..kw {
                h[[t, col + 2 * k + j]] = u * self.w[[t, j]];
            }
        }
        Ok(h)
    }

    /// Column mean of the moment matrix: the GMM moment vector.
    pub fn mean_at(&self, theta: &Array1<f64>) -> LstarResult<Array1<f64>> {
        let h = self.matrix_at(theta)?;
        let n = h.nrows() as f64;
        Ok(h.sum_axis(ndarray::Axis(0)) / n)
    }
}
