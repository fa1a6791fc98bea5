//! rust_econometrics — nonlinear least-squares estimation routines for
//! empirical finance.
//!
//! Purpose
//! -------
//! Provide a small but real estimation engine shared by two nonlinear
//! models and one panel routine:
//! - fitting (extended) Nelson–Siegel yield curves to bond prices
//!   (`yield_curve`),
//! - logistic smooth-transition regressions (LSTAR) with GMM-sandwich
//!   standard errors (`lstar`),
//! - pooled panel OLS with Driscoll–Kraay and White standard errors
//!   (`panel`).
//!
//! Key behaviors
//! -------------
//! - A shared optimization layer (`optimization`) drives derivative-free
//!   Nelder–Mead and bounded golden-section searches through Argmin and
//!   normalizes solver state into crate-level outcomes.
//! - A shared inference layer (`inference`) builds Newey–West long-run
//!   variances of moment conditions and GMM sandwich covariances from
//!   numeric Jacobians.
//! - Linear sub-estimation is profiled out through a single OLS
//!   primitive (`regression`), so the nonlinear searches only see the
//!   genuinely nonlinear parameters.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` containers over `f64`; rows
//!   index observations, columns index parameters or regressors.
//! - Optimizer non-convergence is a value, not an error: estimators
//!   return `converged: bool` alongside an optional estimate, and
//!   callers must check the flag before using outputs.
//! - Each layer owns its error enum and `Result` alias; backend solver
//!   errors are wrapped at the optimization boundary and never leak.

pub mod inference;
pub mod lstar;
pub mod optimization;
pub mod panel;
pub mod regression;
pub mod utils;
pub mod yield_curve;
