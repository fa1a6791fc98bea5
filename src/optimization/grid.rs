//! Cartesian grid evaluation for warm-start selection.
//!
//! The nonlinear searches in this crate are seeded by evaluating the
//! loss on a coarse `Ng×Nc` grid and starting from the argmin cell.
//! Each cell is independent, so the scan could be parallelized; the
//! only ordering requirement is the deterministic tie-break, which this
//! implementation fixes as first occurrence in i-major, j-minor scan
//! order (strict `<` while scanning row-major).
use crate::optimization::errors::{OptError, OptResult};
use ndarray::Array2;

/// Loss surface over a two-axis candidate grid, plus its argmin cell.
#[derive(Debug, Clone)]
pub struct GridSearchResult {
    /// Loss at every `(i, j)` cell, shape `axis0.len() × axis1.len()`.
    pub losses: Array2<f64>,
    /// Row index of the argmin cell.
    pub min_i: usize,
    /// Column index of the argmin cell.
    pub min_j: usize,
    /// Loss at the argmin cell.
    pub min_loss: f64,
}

/// Evaluate `f` on the Cartesian product `axis0 × axis1`.
///
/// # Arguments
/// - `axis0`, `axis1`: candidate values for each axis; both must be
///   non-empty.
/// - `f`: loss at a single `(a0, a1)` pair. Errors abort the scan.
///
/// # Returns
/// The full loss surface and the argmin cell, with exact ties broken
/// by first occurrence in row-major order.
pub fn grid_search<F>(axis0: &[f64], axis1: &[f64], mut f: F) -> OptResult<GridSearchResult>
where
    F: FnMut(f64, f64) -> OptResult<f64>,
{
    if axis0.is_empty() || axis1.is_empty() {
        return Err(OptError::EmptyGrid);
    }

    let mut losses = Array2::<f64>::zeros((axis0.len(), axis1.len()));
    let mut min_i = 0;
    let mut min_j = 0;
    let mut min_loss = f64::INFINITY;
    for (i, &a0) in axis0.iter().enumerate() {
        for (j, &a1) in axis1.iter().enumerate() {
            let loss = f(a0, a1)?;
            losses[[i, j]] = loss;
            if loss < min_loss {
                min_loss = loss;
                min_i = i;
                min_j = j;
            }
        }
    }
    Ok(GridSearchResult { losses, min_i, min_j, min_loss })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that the selected cell is the literal argmin of the loss
    // surface.
    //
    // Given
    // -----
    // - A 2×2 grid {1, 2} × {0, 1} with loss (a0 − 2)² + (a1 − 1)².
    //
    // Expect
    // ------
    // - Argmin at (i=1, j=1) with zero loss, and the surface recorded
    //   cell-for-cell.
    fn grid_search_selects_literal_argmin() {
        let out = grid_search(&[1.0, 2.0], &[0.0, 1.0], |g, c| {
            Ok((g - 2.0) * (g - 2.0) + (c - 1.0) * (c - 1.0))
        })
        .unwrap();

        assert_eq!((out.min_i, out.min_j), (1, 1));
        assert_eq!(out.min_loss, 0.0);
        assert_eq!(out.losses[[0, 0]], 2.0);
        assert_eq!(out.losses[[0, 1]], 1.0);
        assert_eq!(out.losses[[1, 0]], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Pin down the tie-break: exact ties resolve to the first occurrence
    // in row-major scan order.
    //
    // Given
    // -----
    // - A 2×2 grid whose loss is constant.
    //
    // Expect
    // ------
    // - Argmin at (0, 0).
    fn grid_search_ties_break_row_major_first() {
        let out = grid_search(&[1.0, 2.0], &[0.0, 1.0], |_, _| Ok(1.0)).unwrap();
        assert_eq!((out.min_i, out.min_j), (0, 0));
    }

    #[test]
    fn grid_search_rejects_empty_axes() {
        assert!(matches!(
            grid_search(&[], &[1.0], |_, _| Ok(0.0)),
            Err(OptError::EmptyGrid)
        ));
    }

    #[test]
    fn grid_search_propagates_cell_errors() {
        let res = grid_search(&[1.0], &[1.0], |_, _| {
            Err(OptError::NonFiniteCost { value: f64::NAN })
        });
        assert!(matches!(res, Err(OptError::NonFiniteCost { .. })));
    }
}
