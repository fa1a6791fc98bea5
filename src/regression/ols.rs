//! regression::ols — ordinary least squares via eigen-based normal equations.
//!
//! Purpose
//! -------
//! Solve `min_b Σ (y_t − x_t'b)²` and report the full fit bundle the
//! nonlinear estimators profile against: coefficients, residuals,
//! fitted values, coefficient covariance `σ²(X'X)⁻¹`, residual variance,
//! R², and adjusted R².
//!
//! Key behaviors
//! -------------
//! - Solve the normal equations through a symmetric eigendecomposition
//!   of `X'X` rather than an explicit inverse; eigenvalues at or below
//!   [`RANK_EPS`] signal rank deficiency and abort the fit.
//! - Keep the interface `ndarray`-first; `nalgebra` is confined to the
//!   eigen solve.
//!
//! Conventions
//! -----------
//! - Rows index observations, columns regressors. The caller supplies
//!   any intercept column explicitly.
//! - `covariance` is the classical homoskedastic estimate; robust
//!   covariance flavors live in `inference` and are built from moment
//!   conditions, not here.
use crate::regression::errors::{RegResult, RegressionError};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Eigenvalue floor below which `X'X` is treated as rank deficient.
pub const RANK_EPS: f64 = 1e-12;

/// Full OLS fit bundle.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficient estimates, length k.
    pub coefficients: Array1<f64>,
    /// Residuals `y − Xb`, length n.
    pub residuals: Array1<f64>,
    /// Fitted values `Xb`, length n.
    pub fitted: Array1<f64>,
    /// Classical coefficient covariance `σ²(X'X)⁻¹`, k×k.
    pub covariance: Array2<f64>,
    /// Residual variance `Σu² / (n − k)`.
    pub sigma2: f64,
    /// Coefficient of determination.
    pub r2: f64,
    /// Adjusted R².
    pub r2_adj: f64,
    /// Number of observations.
    pub n: usize,
}

impl OlsFit {
    /// Classical standard errors, the square roots of the covariance
    /// diagonal.
    pub fn std_errors(&self) -> Array1<f64> {
        let k = self.coefficients.len();
        Array1::from_iter((0..k).map(|i| self.covariance[[i, i]].sqrt()))
    }
}

/// Fit `y` on the design `x` by ordinary least squares.
///
/// # Arguments
/// - `y`: dependent variable, length n.
/// - `x`: n×k design matrix; the caller includes any constant column.
///
/// # Errors
/// - [`RegressionError::DimensionMismatch`] when `y.len() != x.nrows()`.
/// - [`RegressionError::EmptyDesign`] for `n == 0` or `k == 0`.
/// - [`RegressionError::InsufficientObservations`] when `n ≤ k` (the
///   residual variance needs `n − k > 0`).
/// - [`RegressionError::RankDeficient`] when the smallest eigenvalue of
///   `X'X` is at or below [`RANK_EPS`].
pub fn ols(y: &Array1<f64>, x: &Array2<f64>) -> RegResult<OlsFit> {
    let n = y.len();
    let k = x.ncols();
    if x.nrows() != n {
        return Err(RegressionError::DimensionMismatch { rows_y: n, rows_x: x.nrows() });
    }
    if n == 0 || k == 0 {
        return Err(RegressionError::EmptyDesign);
    }
    if n <= k {
        return Err(RegressionError::InsufficientObservations { n, k });
    }

    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);
    let xtx_inv = invert_gram(&xtx)?;

    let coefficients = xtx_inv.dot(&xty);
    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;

    let ssr = residuals.dot(&residuals);
    let sigma2 = ssr / ((n - k) as f64);
    let covariance = &xtx_inv * sigma2;

    let y_mean = y.sum() / (n as f64);
    let tss: f64 = y.iter().map(|&v| (v - y_mean) * (v - y_mean)).sum();
    // Degenerate y (zero total variation) reports R² = 0 by convention.
    let r2 = if tss > 0.0 { 1.0 - ssr / tss } else { 0.0 };
    let r2_adj = 1.0 - (1.0 - r2) * ((n - 1) as f64) / ((n - k) as f64);

    Ok(OlsFit { coefficients, residuals, fitted, covariance, sigma2, r2, r2_adj, n })
}

// ---- Helper methods ----

/// Invert the Gram matrix `X'X` through its symmetric eigendecomposition.
///
/// Returns `(X'X)⁻¹` reconstructed as `Q Λ⁻¹ Q'`. Any eigenvalue at or
/// below [`RANK_EPS`] aborts with [`RegressionError::RankDeficient`]
/// rather than silently pseudoinverting: a deficient design means the
/// profiled coefficients are not identified, which callers must see.
pub(crate) fn invert_gram(xtx: &Array2<f64>) -> RegResult<Array2<f64>> {
    let k = xtx.ncols();
    let mut gram = DMatrix::<f64>::zeros(k, k);
    for j in 0..k {
        for i in 0..k {
            gram[(i, j)] = xtx[[i, j]];
        }
    }
    let eigen = gram.symmetric_eigen();
    let smallest = eigen.eigenvalues.iter().cloned().fold(f64::INFINITY, f64::min);
    if smallest <= RANK_EPS {
        return Err(RegressionError::RankDeficient { smallest_eigenvalue: smallest });
    }

    let q = eigen.eigenvectors;
    let mut inv = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        for j in 0..k {
            let mut acc = 0.0;
            for (m, &lambda) in eigen.eigenvalues.iter().enumerate() {
                acc += q[(i, m)] * q[(j, m)] / lambda;
            }
            inv[[i, j]] = acc;
        }
    }
    Ok(inv)
}

/// Pseudoinvert the Gram matrix `X'X`, truncating its null space.
///
/// Eigenvalues at or below [`RANK_EPS`] contribute nothing to the
/// reconstruction, so `pinv_gram(xtx).dot(&xty)` is the minimum-norm
/// least-squares solution. The fitted values it produces are still the
/// projection of `y` onto the design's column space, which keeps the
/// residual sum of squares well defined on deficient designs where
/// [`invert_gram`] refuses to proceed.
pub(crate) fn pinv_gram(xtx: &Array2<f64>) -> Array2<f64> {
    let k = xtx.ncols();
    let mut gram = DMatrix::<f64>::zeros(k, k);
    for j in 0..k {
        for i in 0..k {
            gram[(i, j)] = xtx[[i, j]];
        }
    }
    let eigen = gram.symmetric_eigen();
    let q = eigen.eigenvectors;
    let mut inv = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        for j in 0..k {
            let mut acc = 0.0;
            for (m, &lambda) in eigen.eigenvalues.iter().enumerate() {
                if lambda > RANK_EPS {
                    acc += q[(i, m)] * q[(j, m)] / lambda;
                }
            }
            inv[[i, j]] = acc;
        }
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact recovery of coefficients on noiseless linear data.
    // - Agreement with the closed-form univariate slope.
    // - Rank-deficiency detection for collinear designs.
    // - Shape guards.
    //
    // They intentionally DO NOT cover:
    // - Robust covariance flavors (inference layer).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify exact coefficient recovery on noiseless data y = 2 + 3x.
    //
    // Given
    // -----
    // - A 4-point design [1, x] with x = 0..3 and y generated exactly.
    //
    // Expect
    // ------
    // - Coefficients (2, 3) to 1e-10, zero residuals, R² = 1.
    fn ols_recovers_exact_linear_relationship() {
        // Arrange
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![2.0, 5.0, 8.0, 11.0];

        // Act
        let fit = ols(&y, &x).expect("full-rank design should fit");

        // Assert
        assert_relative_eq!(fit.coefficients[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], 3.0, epsilon = 1e-10);
        assert!(fit.residuals.iter().all(|u| u.abs() < 1e-9));
        assert_relative_eq!(fit.r2, 1.0, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Check the slope against the closed-form covariance/variance ratio
    // on noisy data.
    //
    // Given
    // -----
    // - A univariate regression with intercept on 6 points.
    //
    // Expect
    // ------
    // - Fitted slope equals cov(x,y)/var(x) to 1e-10.
    fn ols_slope_matches_closed_form() {
        // Arrange
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.1, 2.9, 5.2, 6.8, 9.1, 10.9];
        let x = Array2::from_shape_fn((6, 2), |(i, j)| if j == 0 { 1.0 } else { xs[i] });
        let y = Array1::from_iter(ys.iter().cloned());

        let x_mean: f64 = xs.iter().sum::<f64>() / 6.0;
        let y_mean: f64 = ys.iter().sum::<f64>() / 6.0;
        let cov: f64 = xs.iter().zip(&ys).map(|(a, b)| (a - x_mean) * (b - y_mean)).sum();
        let var: f64 = xs.iter().map(|a| (a - x_mean) * (a - x_mean)).sum();

        // Act
        let fit = ols(&y, &x).unwrap();

        // Assert
        assert_relative_eq!(fit.coefficients[1], cov / var, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a collinear design is reported as rank deficient.
    //
    // Given
    // -----
    // - A design whose second column is twice the first.
    //
    // Expect
    // ------
    // - `RegressionError::RankDeficient`.
    fn ols_detects_rank_deficiency() {
        let x = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0], [4.0, 8.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];

        match ols(&y, &x) {
            Err(RegressionError::RankDeficient { .. }) => {}
            other => panic!("Expected RankDeficient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Guard against misaligned and undersized inputs.
    //
    // Given
    // -----
    // - A y/X row mismatch, and a square design with n == k.
    //
    // Expect
    // ------
    // - DimensionMismatch and InsufficientObservations respectively.
    fn ols_rejects_bad_shapes() {
        let y3 = array![1.0, 2.0, 3.0];
        let x2 = array![[1.0], [1.0]];
        assert!(matches!(ols(&y3, &x2), Err(RegressionError::DimensionMismatch { .. })));

        let y2 = array![1.0, 2.0];
        let x22 = array![[1.0, 0.0], [0.0, 1.0]];
        assert!(matches!(ols(&y2, &x22), Err(RegressionError::InsufficientObservations { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify the classical covariance diagonal against the textbook
    // univariate formula.
    //
    // Given
    // -----
    // - A noisy univariate regression with intercept.
    //
    // Expect
    // ------
    // - cov[1,1] equals sigma2 / Σ(x − x̄)² to 1e-10.
    fn ols_covariance_matches_textbook_univariate() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.2, 1.1, 1.9, 3.2, 3.8];
        let x = Array2::from_shape_fn((5, 2), |(i, j)| if j == 0 { 1.0 } else { xs[i] });
        let y = Array1::from_iter(ys.iter().cloned());

        let fit = ols(&y, &x).unwrap();

        let x_mean: f64 = xs.iter().sum::<f64>() / 5.0;
        let sxx: f64 = xs.iter().map(|a| (a - x_mean) * (a - x_mean)).sum();
        assert_relative_eq!(fit.covariance[[1, 1]], fit.sigma2 / sxx, epsilon = 1e-10);
    }
}
