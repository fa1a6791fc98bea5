//! Normalized result of a minimizer run.
use crate::optimization::errors::{OptError, OptResult};
use argmin::core::{TerminationReason, TerminationStatus};
use ndarray::Array1;

/// Parameter vector for the nonlinear searches.
///
/// Alias for `ndarray::Array1<f64>`, the canonical parameter type
/// throughout the crate.
pub type Theta = Array1<f64>;

/// Canonical result returned by the minimizer drivers.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best objective value (the scaled loss, not raw sse).
/// - `converged`: `true` if the solver terminated for a reason other
///   than exhausting its iteration budget.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of solver iterations performed.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
}

impl MinimizeOutcome {
    /// Build a validated [`MinimizeOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - presence and finiteness checks on `theta_hat`,
    /// - finiteness check on `value`,
    /// - mapping of `TerminationStatus` into `(converged, status)`.
    ///   Budget exhaustion (`MaxItersReached`) counts as non-converged;
    ///   every other terminating reason counts as converged.
    ///
    /// # Errors
    /// - [`OptError::MissingThetaHat`] when the solver produced no best
    ///   parameter.
    /// - [`OptError::InvalidThetaHat`] when any entry is non-finite.
    /// - [`OptError::NonFiniteCost`] when the best value is non-finite.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
    ) -> OptResult<Self> {
        let theta_hat = match theta_hat_opt {
            Some(theta) => theta,
            None => return Err(OptError::MissingThetaHat),
        };
        for (index, &v) in theta_hat.iter().enumerate() {
            if !v.is_finite() {
                return Err(OptError::InvalidThetaHat {
                    index,
                    value: v,
                    reason: "Estimated parameters must be finite.",
                });
            }
        }
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value });
        }

        let status = format!("{termination:?}");
        let converged = match &termination {
            TerminationStatus::NotTerminated => false,
            TerminationStatus::Terminated(reason) => {
                !matches!(reason, TerminationReason::MaxItersReached)
            }
        };
        Ok(Self { theta_hat, value, converged, status, iterations: iterations as usize })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmin::core::TerminationReason;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify the termination mapping: solver convergence is converged,
    // budget exhaustion is not, and absent/non-finite state errors out.
    //
    // Given
    // -----
    // - Raw states with different termination reasons and payloads.
    //
    // Expect
    // ------
    // - `converged` flags and error variants as documented.
    fn outcome_maps_termination_status() {
        let ok = MinimizeOutcome::new(
            Some(array![1.0, 2.0]),
            0.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
        )
        .unwrap();
        assert!(ok.converged);
        assert_eq!(ok.iterations, 12);

        let capped = MinimizeOutcome::new(
            Some(array![1.0]),
            0.5,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            10_000,
        )
        .unwrap();
        assert!(!capped.converged);

        assert!(matches!(
            MinimizeOutcome::new(None, 0.5, TerminationStatus::NotTerminated, 0),
            Err(OptError::MissingThetaHat)
        ));
        assert!(matches!(
            MinimizeOutcome::new(
                Some(array![f64::NAN]),
                0.5,
                TerminationStatus::NotTerminated,
                0
            ),
            Err(OptError::InvalidThetaHat { .. })
        ));
    }
}
