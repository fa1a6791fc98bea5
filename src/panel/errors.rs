//! panel::errors — error taxonomy for the panel layer.
use crate::inference::errors::InferenceError;
use crate::regression::errors::RegressionError;

/// Result alias for the panel layer.
pub type PanelResult<T> = Result<T, PanelError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelError {
    /// Input arrays are not row-aligned.
    DimensionMismatch { rows_y: usize, rows_x: usize, rows_time: usize },
    /// No rows survive NaN pruning.
    EmptyPanel,
    Regression(RegressionError),
    Inference(InferenceError),
}

impl std::error::Error for PanelError {}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::DimensionMismatch { rows_y, rows_x, rows_time } => {
                write!(
                    f,
                    "Panel Error: misaligned inputs (y: {rows_y} rows, x: {rows_x} rows, \
                     time: {rows_time} rows)"
                )
            }
            PanelError::EmptyPanel => {
                write!(f, "Panel Error: no observations survive NaN pruning")
            }
            PanelError::Regression(err) => write!(f, "Panel Error: {err}"),
            PanelError::Inference(err) => write!(f, "Panel Error: {err}"),
        }
    }
}

impl From<RegressionError> for PanelError {
    fn from(err: RegressionError) -> Self {
        PanelError::Regression(err)
    }
}

impl From<InferenceError> for PanelError {
    fn from(err: InferenceError) -> Self {
        PanelError::Inference(err)
    }
}
