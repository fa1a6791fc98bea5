//! optimization — derivative-free minimizers and unified error surface.
//!
//! Purpose
//! -------
//! Provide the nonlinear search machinery shared by the yield-curve and
//! LSTAR estimators: an Argmin-backed Nelder–Mead driver for
//! multivariate searches, a bounded golden-section driver for the
//! univariate branch, and a deterministic Cartesian grid scan for
//! warm-start selection. Callers implement a loss trait, choose a
//! tolerance and iteration budget, and receive a normalized outcome.
//!
//! Conventions
//! -----------
//! - Losses are minimized directly; no sign conventions live here.
//! - Parameters are `ndarray` vectors ([`Theta`]); the scalar search
//!   returns a length-1 vector so both drivers share one outcome type.
//! - Budget exhaustion is a `converged == false` outcome, never an
//!   error; callers decide how to report it.
//! - Public entrypoints that can fail return [`OptResult<T>`]; raw
//!   Argmin errors never escape this layer.

pub mod errors;
pub mod golden_section;
pub mod grid;
pub mod nelder_mead;
pub mod options;
pub mod outcome;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{OptError, OptResult};
pub use self::golden_section::{ScalarObjective, run_golden_section};
pub use self::grid::{GridSearchResult, grid_search};
pub use self::nelder_mead::{Objective, run_nelder_mead};
pub use self::options::MinimizeOptions;
pub use self::outcome::{MinimizeOutcome, Theta};
