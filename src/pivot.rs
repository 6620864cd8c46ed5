//! Row-reduction steps shared by every solver in the crate.
//!
//! Two flavours exist. The *Jordan* pivot is the modified Jordan exclusion step, where the pivot
//! cell becomes `1/p` and the pivot column is negated and divided by `p`. The *Gauss* pivot
//! normalizes the pivot row and clears the pivot column, leaving a unit column behind.

use nalgebra::DMatrix;

use crate::error::{ensure_in_range, PivotError, ZeroPivotError};

fn checked_pivot(
    matrix: &DMatrix<f64>,
    row: usize,
    column: usize,
    epsilon: f64,
) -> Result<f64, PivotError> {
    ensure_in_range("row", row, matrix.nrows())?;
    ensure_in_range("column", column, matrix.ncols())?;
    let value = matrix[(row, column)];
    if value.abs() <= epsilon {
        log::warn!("Rejected pivot a[{row}, {column}] = {value}");
        return Err(ZeroPivotError { row, column, value }.into());
    }
    Ok(value)
}

/// Modified Jordan exclusion at `(row, column)`. The input is left untouched.
///
/// Applying it twice at the same cell gives back the original matrix.
pub fn jordan_pivot(
    matrix: &DMatrix<f64>,
    row: usize,
    column: usize,
    epsilon: f64,
) -> Result<DMatrix<f64>, PivotError> {
    let pivot = checked_pivot(matrix, row, column, epsilon)?;
    Ok(DMatrix::from_fn(
        matrix.nrows(),
        matrix.ncols(),
        |i, j| match (i == row, j == column) {
            (true, true) => 1. / pivot,
            (true, false) => matrix[(row, j)] / pivot,
            (false, true) => -matrix[(i, column)] / pivot,
            (false, false) => matrix[(i, j)] - matrix[(i, column)] * matrix[(row, j)] / pivot,
        },
    ))
}

/// Gauss-Jordan pivot at `(row, column)`: the result has a unit vector in `column`.
pub fn gauss_pivot(
    matrix: &DMatrix<f64>,
    row: usize,
    column: usize,
    epsilon: f64,
) -> Result<DMatrix<f64>, PivotError> {
    let pivot = checked_pivot(matrix, row, column, epsilon)?;
    let mut result = matrix.clone_owned();
    normalize_row(&mut result, row, pivot);
    eliminate_column(&mut result, row, column, epsilon);
    Ok(result)
}

/// Divides every element of `row` by `pivot`.
pub(crate) fn normalize_row(matrix: &mut DMatrix<f64>, row: usize, pivot: f64) {
    matrix.row_mut(row).apply(|el| *el /= pivot);
    log::debug!("Row {row} normalized by {pivot}");
}

/// Subtracts multiples of the (already normalized) pivot row from all other rows until
/// `column` is zero outside of `row`. Rows whose factor is below `epsilon` are skipped.
pub(crate) fn eliminate_column(matrix: &mut DMatrix<f64>, row: usize, column: usize, epsilon: f64) {
    let pivot_row = matrix.row(row).into_owned();
    for i in (0..matrix.nrows()).filter(|i| i != &row) {
        let multiplier = matrix[(i, column)];
        if multiplier.abs() > epsilon {
            matrix
                .row_mut(i)
                .zip_apply(&pivot_row, |el, pivot_row_el| *el -= pivot_row_el * multiplier);
        }
        matrix[(i, column)] = 0.;
    }
}
