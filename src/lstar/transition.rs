//! lstar::transition — the logistic transition function and its
//! parameter derivatives.
//!
//! The transition weight is `G(z) = 1 / (1 + e^(−γ(z − c)))`, blending
//! the two regimes as the driver `z` crosses the location `c`. The slope
//! `γ` is canonicalized to be nonnegative upstream (in the profiler);
//! these functions evaluate the parameters as given.
use ndarray::Array1;

/// Logistic transition weight at a single driver value.
pub fn logistic_weight(z: f64, gamma: f64, c: f64) -> f64 {
    1.0 / (1.0 + (-gamma * (z - c)).exp())
}

/// Transition weights for a whole driver column.
pub fn transition_weights(z: &Array1<f64>, gamma: f64, c: f64) -> Array1<f64> {
    z.mapv(|zt| logistic_weight(zt, gamma, c))
}

/// `∂G/∂γ = G(1 − G)(z − c)` at a single observation.
pub fn dg_dgamma(g: f64, z: f64, c: f64) -> f64 {
    g * (1.0 - g) * (z - c)
}

/// `∂G/∂c = −γ·G(1 − G)` at a single observation.
pub fn dg_dc(g: f64, gamma: f64) -> f64 {
    -gamma * g * (1.0 - g)
}
