//! inference — long-run variance and sandwich covariance machinery.
//!
//! Purpose
//! -------
//! House the robust-inference layer shared by the model estimators:
//! Newey–West/Bartlett long-run covariance of a moment series, the GMM
//! sandwich covariance built on top of it, and the error taxonomy both
//! report through.
//!
//! Layout
//! ------
//! - [`errors`]: `InferenceError` and the `InferenceResult` alias.
//! - [`longrun`]: Bartlett-tapered long-run variance; bandwidth `0`
//!   reduces to the White estimator.
//! - [`sandwich`]: numeric-Jacobian sandwich `Cov(θ̂) = J⁻¹ S J⁻ᵀ / T`
//!   plus standard-error extraction.
pub mod errors;
pub mod longrun;
pub mod sandwich;

pub use errors::{InferenceError, InferenceResult};
pub use longrun::long_run_variance;
pub use sandwich::{sandwich_covariance, std_errors_from_covariance, SINGULAR_EPS};
