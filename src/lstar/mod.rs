//! lstar — logistic smooth-transition regression (LSTAR).
//!
//! Purpose
//! -------
//! Estimate a two-regime regression whose coefficients blend through a
//! logistic function of a threshold driver. The layer splits into the
//! transition function ([`transition`]), the (γ, c) keep specification
//! ([`profile`]), the profiled least-squares loss with its diagnostic
//! bundle ([`loss`]), the GMM moment conditions ([`moments`]), and the
//! grid-initialized outer search ([`estimator`]).
pub mod errors;
pub mod estimator;
pub mod loss;
pub mod moments;
pub mod profile;
pub mod transition;

pub use errors::{LstarError, LstarResult};
pub use estimator::{
    estimate_lstar, LstarConfig, LstarFit, RegimeContrast, LSTAR_MAX_ITER, LSTAR_TOL,
};
pub use loss::{TransitionFitDetails, TransitionLoss};
pub use moments::MomentContext;
pub use profile::{EstimationKind, GcSlot, GcSpec};
pub use transition::{logistic_weight, transition_weights};
