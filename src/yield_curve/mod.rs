//! yield_curve — Nelson–Siegel/Svensson curve fitting from bond prices.
//!
//! Purpose
//! -------
//! Fit the (extended) Nelson–Siegel term structure to a bond sample by
//! nonlinear least squares. The layer splits into the parameter model
//! with its restriction handling ([`params`]), curve evaluation
//! ([`curve`]), bond cashflows and yield inversion ([`bond`]), the
//! weighted loss ([`loss`]), and the Nelder–Mead driver ([`estimator`]).
pub mod bond;
pub mod curve;
pub mod errors;
pub mod estimator;
pub mod loss;
pub mod params;

pub use bond::{cashflow_times, price_bond, yield_to_maturity, Bond, YTM_GUESS, YTM_TOL};
pub use curve::{discount_factor, evaluate_curve, forward_rate, spot_rate, CurveEvaluation};
pub use errors::{CurveError, CurveResult};
pub use estimator::{
    estimate_curve, CurveFit, CurveFitConfig, CURVE_MAX_ITER, CURVE_MAX_RESTARTS, CURVE_TOL,
};
pub use loss::{LossSpace, PricingLoss, Weights};
pub use params::{CurveParams, CurveSpec};
