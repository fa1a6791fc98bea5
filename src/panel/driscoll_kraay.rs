//! panel::driscoll_kraay — pooled OLS with Driscoll–Kraay and White
//! standard errors for unbalanced panels.
//!
//! Purpose
//! -------
//! Fit a pooled OLS regression on long-format panel data (one row per
//! unit×period observation) and report three standard-error flavors:
//! classical OLS, heteroskedasticity-robust White, and Driscoll–Kraay,
//! which applies a Newey–West correction to per-period cross-sectional
//! moment averages and is therefore robust to both cross-sectional and
//! serial dependence.
//!
//! Key behaviors
//! -------------
//! - Rows containing NaN in `y` or any regressor are excised jointly
//!   before estimation; the effective count is reported explicitly.
//! - Period labels are mapped to a chronological dense index; the lag
//!   structure of the Driscoll–Kraay kernel runs over that index.
//! - [`ScalePolicy`] picks the divisor of the per-period moment sums:
//!   the nominal panel width (largest per-period row count as supplied)
//!   or each period's effective post-pruning count. The bread matrix is
//!   scaled the same way, so balanced NaN-free panels are unaffected by
//!   the choice.
//! - With one observation per period and bandwidth 0, the
//!   Driscoll–Kraay covariance collapses to the White covariance.
use crate::inference::longrun::long_run_variance;
use crate::panel::errors::{PanelError, PanelResult};
use crate::regression::ols::{invert_gram, ols};
use crate::utils::excise;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Divisor of the per-period cross-sectional moment sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePolicy {
    /// Divide every period by the nominal panel width (the largest
    /// per-period row count in the supplied data).
    FullPanel,
    /// Divide each period by its own effective observation count.
    EffectiveCount,
}

/// Result of a pooled panel regression.
#[derive(Debug, Clone)]
pub struct PanelFit {
    pub coefficients: Array1<f64>,
    /// Classical OLS standard errors.
    pub se_ols: Array1<f64>,
    /// Heteroskedasticity-robust (White) standard errors.
    pub se_white: Array1<f64>,
    /// Driscoll–Kraay standard errors.
    pub se_driscoll_kraay: Array1<f64>,
    pub r2: f64,
    pub r2_adj: f64,
    /// Rows entering the regression after NaN pruning.
    pub n_effective: usize,
    /// Rows supplied, including NaN-bearing ones.
    pub n_total: usize,
    /// Distinct periods among the surviving rows.
    pub n_periods: usize,
}

/// Pooled OLS with Driscoll–Kraay and White standard errors.
///
/// # Arguments
/// - `y`: dependent variable, length n.
/// - `x`: n×k design matrix; the caller includes any constant column.
/// - `time`: period label per row; labels sort chronologically.
/// - `bandwidth`: Newey–West lag window over periods; `0` makes the
///   Driscoll–Kraay "meat" a pure outer-product estimate.
/// - `scale`: divisor policy for the per-period moment sums.
///
/// # Errors
/// - [`PanelError::DimensionMismatch`] for misaligned inputs.
/// - [`PanelError::EmptyPanel`] when no rows survive pruning.
/// - Rank deficiency from OLS and bandwidth violations from the
///   long-run variance, via the corresponding conversions.
pub fn driscoll_kraay(
    y: &Array1<f64>, x: &Array2<f64>, time: &[usize], bandwidth: usize, scale: ScalePolicy,
) -> PanelResult<PanelFit> {
    let n_total = y.len();
    if x.nrows() != n_total || time.len() != n_total {
        return Err(PanelError::DimensionMismatch {
            rows_y: n_total,
            rows_x: x.nrows(),
            rows_time: time.len(),
        });
    }

    // Joint NaN pruning; the period labels ride along as the z column.
    let time_f = Array1::from_iter(time.iter().map(|&t| t as f64));
    let empty_w = Array2::<f64>::zeros((n_total, 0));
    let sample = excise(y, x, &empty_w, &time_f).ok_or(PanelError::EmptyPanel)?;
    if sample.n == 0 {
        return Err(PanelError::EmptyPanel);
    }
    let n = sample.n;
    let k = sample.x.ncols();

    let fit = ols(&sample.y, &sample.x)?;
    let u = &fit.residuals;

    // Per-observation moment rows x_i·u_i.
    let mut obs_moments = Array2::<f64>::zeros((n, k));
    for i in 0..n {
        for j in 0..k {
            obs_moments[[i, j]] = sample.x[[i, j]] * u[i];
        }
    }

    // Chronological dense period index over the surviving rows.
    let mut labels: Vec<usize> = sample.z.iter().map(|&v| v as usize).collect();
    let mut unique = labels.clone();
    unique.sort_unstable();
    unique.dedup();
    let period_of: HashMap<usize, usize> =
        unique.iter().enumerate().map(|(idx, &label)| (label, idx)).collect();
    let t_periods = unique.len();
    labels.iter_mut().for_each(|label| *label = period_of[label]);

    // Nominal panel width from the supplied (pre-pruning) rows.
    let mut nominal_counts: HashMap<usize, usize> = HashMap::new();
    for &label in time {
        *nominal_counts.entry(label).or_insert(0) += 1;
    }
    let nominal_width = nominal_counts.values().copied().max().unwrap_or(1);

    let mut effective_counts = vec![0usize; t_periods];
    for &p in &labels {
        effective_counts[p] += 1;
    }
    let divisor = |p: usize| -> f64 {
        match scale {
            ScalePolicy::FullPanel => nominal_width as f64,
            ScalePolicy::EffectiveCount => effective_counts[p].max(1) as f64,
        }
    };

    // Per-period moment averages and the matching bread matrix.
    let mut period_means = Array2::<f64>::zeros((t_periods, k));
    let mut bread_dk = Array2::<f64>::zeros((k, k));
    for i in 0..n {
        let p = labels[i];
        let c = divisor(p);
        for j in 0..k {
            period_means[[p, j]] += obs_moments[[i, j]] / c;
            for l in 0..k {
                bread_dk[[j, l]] += sample.x[[i, j]] * sample.x[[i, l]] / c;
            }
        }
    }
    bread_dk /= t_periods as f64;

    // White: bread X'X/n, meat from per-observation moments.
    let bread_white = sample.x.t().dot(&sample.x) / (n as f64);
    let s_white = long_run_variance(&obs_moments, 0)?;
    let bw_inv = invert_gram(&bread_white)?;
    let cov_white = bw_inv.dot(&s_white).dot(&bw_inv) / (n as f64);

    // Driscoll–Kraay: Newey–West over the period averages.
    let s_dk = long_run_variance(&period_means, bandwidth)?;
    let bdk_inv = invert_gram(&bread_dk)?;
    let cov_dk = bdk_inv.dot(&s_dk).dot(&bdk_inv) / (t_periods as f64);

    Ok(PanelFit {
        se_ols: fit.std_errors(),
        se_white: diag_sqrt(&cov_white),
        se_driscoll_kraay: diag_sqrt(&cov_dk),
        coefficients: fit.coefficients,
        r2: fit.r2,
        r2_adj: fit.r2_adj,
        n_effective: n,
        n_total,
        n_periods: t_periods,
    })
}

// ---- Helper methods ----

fn diag_sqrt(cov: &Array2<f64>) -> Array1<f64> {
    Array1::from_iter((0..cov.nrows()).map(|i| cov[[i, i]].max(0.0).sqrt()))
}
