//! Unified error handling for the linear regression primitive.

/// Result alias for regression operations.
pub type RegResult<T> = Result<T, RegressionError>;

/// Error type for the OLS primitive.
///
/// Rank deficiency is the only numerically interesting failure; the
/// remaining variants guard the input shapes so downstream code can
/// assume conformable designs.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// Design matrix is not full column rank (smallest eigenvalue of
    /// X'X at or below the numerical floor).
    RankDeficient { smallest_eigenvalue: f64 },

    /// y length and design row count disagree.
    DimensionMismatch { rows_y: usize, rows_x: usize },

    /// Fewer observations than regressors.
    InsufficientObservations { n: usize, k: usize },

    /// Empty sample or zero-column design.
    EmptyDesign,
}

impl std::error::Error for RegressionError {}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionError::RankDeficient { smallest_eigenvalue } => {
                write!(f, "Design matrix is rank deficient (smallest eigenvalue of X'X = {smallest_eigenvalue})")
            }
            RegressionError::DimensionMismatch { rows_y, rows_x } => {
                write!(f, "Dimension mismatch: y has {rows_y} rows, X has {rows_x}")
            }
            RegressionError::InsufficientObservations { n, k } => {
                write!(f, "Insufficient observations: n = {n} with k = {k} regressors")
            }
            RegressionError::EmptyDesign => {
                write!(f, "Empty sample or zero-column design matrix")
            }
        }
    }
}
