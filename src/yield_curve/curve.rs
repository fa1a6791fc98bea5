//! yield_curve::curve — spot, forward, and discount evaluation.
//!
//! Purpose
//! -------
//! Evaluate the Nelson–Siegel/Svensson term structure at a set of
//! maturities. The loading functions are
//! `f1(x) = (1 − e^(−x)) / x` and `f2(x) = f1(x) − e^(−x)`, giving
//!
//! `spot(t) = b0 + b1·f1(t/τ) + b2·f2(t/τ) + b3·f2(t/τ2)`
//! `forward(t) = b0 + b1·e^(−t/τ) + b2·(t/τ)e^(−t/τ) + b3·(t/τ2)e^(−t/τ2)`
//! `discount(t) = e^(−spot(t)·t)`
//!
//! Callers guarantee `t > 0` and `τ, τ2 > 0`; there are no error paths.
use crate::yield_curve::params::CurveParams;
use ndarray::Array1;

/// Parallel curve values aligned with the input maturities.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveEvaluation {
    pub spot: Array1<f64>,
    pub forward: Array1<f64>,
    pub discount: Array1<f64>,
}

/// Evaluate spot, forward, and discount curves at every maturity.
pub fn evaluate_curve(times: &Array1<f64>, params: &CurveParams) -> CurveEvaluation {
    let spot = times.mapv(|t| spot_rate(t, params));
    let forward = times.mapv(|t| forward_rate(t, params));
    let discount = times.mapv(|t| discount_factor(t, params));
    CurveEvaluation { spot, forward, discount }
}

/// Spot rate at a single maturity.
pub fn spot_rate(t: f64, params: &CurveParams) -> f64 {
    let x = t / params.tau;
    let x2 = t / params.tau2;
    params.b0
        + params.b1 * loading_f1(x)
        + params.b2 * loading_f2(x)
        + params.b3 * loading_f2(x2)
}

/// Instantaneous forward rate at a single maturity.
pub fn forward_rate(t: f64, params: &CurveParams) -> f64 {
    let x = t / params.tau;
    let x2 = t / params.tau2;
    params.b0
        + params.b1 * (-x).exp()
        + params.b2 * x * (-x).exp()
        + params.b3 * x2 * (-x2).exp()
}

/// Discount factor `e^(−spot(t)·t)` at a single maturity.
pub fn discount_factor(t: f64, params: &CurveParams) -> f64 {
    (-spot_rate(t, params) * t).exp()
}

// ---- Helper methods ----

fn loading_f1(x: f64) -> f64 {
    (1.0 - (-x).exp()) / x
}

fn loading_f2(x: f64) -> f64 {
    loading_f1(x) - (-x).exp()
}
