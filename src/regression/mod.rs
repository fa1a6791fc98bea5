//! regression — the linear least-squares primitive.
//!
//! The nonlinear estimators in this crate profile their linear
//! coefficients out through a single OLS routine; everything a caller
//! needs from that sub-fit (coefficients, residuals, covariance, R²)
//! comes back in one bundle. Robust covariance flavors are *not* built
//! here — they live in `inference` and consume moment conditions.

pub mod errors;
pub mod ols;

pub use self::errors::{RegResult, RegressionError};
pub use self::ols::{OlsFit, ols};
