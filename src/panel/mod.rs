//! panel — pooled panel regression with dependence-robust inference.
//!
//! Pooled OLS over long-format unit×time data with classical, White,
//! and Driscoll–Kraay standard errors ([`driscoll_kraay`]).
pub mod driscoll_kraay;
pub mod errors;

pub use driscoll_kraay::{driscoll_kraay, PanelFit, ScalePolicy};
pub use errors::{PanelError, PanelResult};
