//! inference::longrun — Newey–West long-run variance of moment conditions.
//!
//! Purpose
//! -------
//! Build the long-run covariance matrix of mean moment conditions from a
//! `T×p` matrix of per-observation moments (rows=time, cols=moment
//! components). The estimator has the form
//!
//! ```text
//! S   = Γ₀ + ∑_{j=1}^{m} (1 − j/(m+1)) (Γ_j + Γ_jᵀ),
//! Γ₀  = (1/T) Hᵀ H,
//! Γ_j = (1/T) H_{j:}ᵀ H_{:T−j},
//! ```
//!
//! where `H` is the moment matrix, `m` the bandwidth, and the Bartlett
//! taper `1 − j/(m+1)` downweights higher lags. With `m = 0` this is
//! the White / outer-product estimator.
//!
//! Key behaviors
//! -------------
//! - The same routine serves two callers: the LSTAR sandwich covariance
//!   (rows = time), and the Driscoll–Kraay panel correction (rows =
//!   per-period cross-sectional moment sums).
//! - Lag contributions are built from sliced views; no `p×p`
//!   temporaries beyond the per-lag dot product.
//!
//! Invariants & assumptions
//! ------------------------
//! - `T ≥ 1` and `p ≥ 1`; empty inputs are rejected.
//! - The effective bandwidth must satisfy `m ≤ T − 1`; larger requests
//!   are an error rather than a silent truncation, because the panel
//!   caller sizes its bandwidth from a different index than the row
//!   count.
//! - The output is symmetric `p×p` by construction. Positive
//!   semi-definiteness holds up to numerical tolerance; callers needing
//!   usable downstream results must ensure `p ≤ T`.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::{Array2, s};

/// Long-run covariance of the rows of a `T×p` moment matrix.
///
/// # Arguments
/// - `moments`: `T×p` per-observation moment conditions.
/// - `bandwidth`: Newey–West lag truncation `m`; `0` gives the plain
///   outer-product (White) estimator.
///
/// # Returns
/// A symmetric `p×p` matrix `S` as defined in the module header.
///
/// # Errors
/// - [`InferenceError::EmptyMomentMatrix`] for zero rows or columns.
/// - [`InferenceError::BandwidthTooLarge`] when `bandwidth > T − 1`.
pub fn long_run_variance(moments: &Array2<f64>, bandwidth: usize) -> InferenceResult<Array2<f64>> {
    let t = moments.nrows();
    let p = moments.ncols();
    if t == 0 || p == 0 {
        return Err(InferenceError::EmptyMomentMatrix);
    }
    if bandwidth >= t {
        return Err(InferenceError::BandwidthTooLarge { bandwidth, rows: t });
    }

    let scale = 1.0 / (t as f64);
    let mut cov = Array2::<f64>::zeros((p, p));

    // Γ₀ term.
    let moments_t = moments.t();
    cov.scaled_add(scale, &moments_t.dot(moments));

    // Tapered lag terms, symmetrized.
    for lag in 1..=bandwidth {
        let weight = 1.0 - (lag as f64) / ((bandwidth + 1) as f64);
        let lagged = moments.slice(s![lag.., ..]);
        let leading = moments.slice(s![..t - lag, ..]);
        let gamma = lagged.t().dot(&leading);
        cov.scaled_add(weight * scale, &gamma);
        cov.scaled_add(weight * scale, &gamma.t());
    }
    Ok(cov)
}
