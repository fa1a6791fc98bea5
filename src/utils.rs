//! Joint NaN-row pruning ("excise") over aligned array groups.
//!
//! Estimation samples arrive as parallel columns (y, regressors,
//! transition driver, weights) that must stay row-aligned. A row is
//! dropped from *every* group as soon as any of its entries is NaN, and
//! the effective row count is returned explicitly so callers never have
//! to infer it from array emptiness.
use ndarray::{Array1, Array2, Axis};

/// Row-aligned view of an estimation sample: a dependent vector plus up
/// to two regressor blocks and one extra driver column.
///
/// All members must have the same number of rows; `excise` enforces this
/// and rebuilds each member with the NaN-bearing rows removed.
#[derive(Debug, Clone)]
pub struct ExcisedSample {
    pub y: Array1<f64>,
    pub x: Array2<f64>,
    pub w: Array2<f64>,
    pub z: Array1<f64>,
    /// Number of surviving rows after pruning.
    pub n: usize,
}

/// Remove every row containing a NaN from a jointly aligned sample.
///
/// # Arguments
/// - `y`: dependent variable, length `n`.
/// - `x`: `n×k` regressor block (may have zero columns).
/// - `w`: `n×kw` second regressor block (may have zero columns).
/// - `z`: extra driver column, length `n`.
///
/// # Returns
/// An [`ExcisedSample`] whose members contain only the rows where every
/// entry across all four inputs is non-NaN, together with the surviving
/// row count. Returns `None` when the inputs are not row-aligned.
pub fn excise(
    y: &Array1<f64>, x: &Array2<f64>, w: &Array2<f64>, z: &Array1<f64>,
) -> Option<ExcisedSample> {
    let n = y.len();
    if x.nrows() != n || w.nrows() != n || z.len() != n {
        return None;
    }

    let keep: Vec<usize> = (0..n)
        .filter(|&t| {
            !y[t].is_nan()
                && !z[t].is_nan()
                && x.row(t).iter().all(|v| !v.is_nan())
                && w.row(t).iter().all(|v| !v.is_nan())
        })
        .collect();

    let y_out = Array1::from_iter(keep.iter().map(|&t| y[t]));
    let z_out = Array1::from_iter(keep.iter().map(|&t| z[t]));
    let x_out = x.select(Axis(0), &keep);
    let w_out = w.select(Axis(0), &keep);
    let n_out = keep.len();
    Some(ExcisedSample { y: y_out, x: x_out, w: w_out, z: z_out, n: n_out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify that rows containing a NaN in any member are removed from
    // every member, and that clean rows survive untouched.
    //
    // Given
    // -----
    // - A 4-row sample with a NaN in y at row 1 and a NaN in x at row 3.
    //
    // Expect
    // ------
    // - Rows 0 and 2 survive in all members; `n == 2`.
    fn excise_drops_nan_rows_jointly() {
        // Arrange
        let y = array![1.0, f64::NAN, 3.0, 4.0];
        let x = array![[1.0, 0.5], [1.0, 0.6], [1.0, 0.7], [f64::NAN, 0.8]];
        let w = array![[2.0], [2.0], [2.0], [2.0]];
        let z = array![0.1, 0.2, 0.3, 0.4];

        // Act
        let out = excise(&y, &x, &w, &z).expect("aligned inputs should excise");

        // Assert
        assert_eq!(out.n, 2);
        assert_eq!(out.y, array![1.0, 3.0]);
        assert_eq!(out.z, array![0.1, 0.3]);
        assert_eq!(out.x, array![[1.0, 0.5], [1.0, 0.7]]);
        assert_eq!(out.w.nrows(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure misaligned inputs are rejected rather than silently
    // truncated.
    //
    // Given
    // -----
    // - A y of length 3 against a 2-row x.
    //
    // Expect
    // ------
    // - `excise` returns `None`.
    fn excise_rejects_misaligned_inputs() {
        let y = array![1.0, 2.0, 3.0];
        let x = array![[1.0], [1.0]];
        let w = Array2::<f64>::zeros((3, 0));
        let z = array![0.0, 0.0, 0.0];

        assert!(excise(&y, &x, &w, &z).is_none());
    }

    #[test]
    // Purpose
    // -------
    // Check that a fully clean sample passes through unchanged.
    //
    // Given
    // -----
    // - A 3-row sample with no NaNs and zero-column blocks.
    //
    // Expect
    // ------
    // - All rows survive; shapes are preserved.
    fn excise_clean_sample_is_identity() {
        let y = array![1.0, 2.0, 3.0];
        let x = array![[1.0], [2.0], [3.0]];
        let w = Array2::<f64>::zeros((3, 0));
        let z = array![0.5, 0.6, 0.7];

        let out = excise(&y, &x, &w, &z).unwrap();
        assert_eq!(out.n, 3);
        assert_eq!(out.y, y);
        assert_eq!(out.x, x);
        assert_eq!(out.w.dim(), (3, 0));
    }
}
