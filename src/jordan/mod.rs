//! Interactive modified Jordan exclusion.
//!
//! Each table row reads `row_label = Σ matrix[row][j] · column_label[j]`. Exchanging at
//! `(r, s)` solves row `r` for the variable of column `s`. Afterwards column `s` holds the
//! negated former row variable and row `r` holds the negated former column variable.

mod label;

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

pub use label::{Label, Role};

use crate::{
    ensure_eq,
    error::{InputError, PivotError},
    helpers::f64_rounded_string,
    pivot::jordan_pivot,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JordanTable {
    matrix: DMatrix<f64>,
    columns: Vec<Label>,
    rows: Vec<Label>,
    history: Vec<String>,
}

impl JordanTable {
    /// Starts a table with columns `-X1..-Xn` and rows `Y1..Ym`.
    pub fn new(matrix: DMatrix<f64>) -> Self {
        let columns = (0..matrix.ncols()).map(|j| -Label::input(j)).collect();
        let rows = (0..matrix.nrows()).map(Label::output).collect();
        Self {
            matrix,
            columns,
            rows,
            history: vec!["Initial table created.".to_owned()],
        }
    }

    /// Restores a table from previously obtained parts, e.g. a replayed UI state.
    pub fn from_parts(
        matrix: DMatrix<f64>,
        columns: Vec<Label>,
        rows: Vec<Label>,
        history: Vec<String>,
    ) -> Result<Self, InputError> {
        ensure_eq!(columns.len(), matrix.ncols());
        ensure_eq!(rows.len(), matrix.nrows());
        Ok(Self {
            matrix,
            columns,
            rows,
            history,
        })
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn column_labels(&self) -> &[Label] {
        &self.columns
    }

    pub fn row_labels(&self) -> &[Label] {
        &self.rows
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Exchanges the row variable `row` with the column variable `column`.
    ///
    /// `self` is left as it was, so a rejected pivot changes nothing.
    pub fn exchange(
        &self,
        row: usize,
        column: usize,
        epsilon: f64,
    ) -> Result<Self, PivotError> {
        let matrix = jordan_pivot(&self.matrix, row, column, epsilon)?;
        let pivot = self.matrix[(row, column)];

        let old_column = self.columns[column];
        let old_row = self.rows[row];
        let mut columns = self.columns.clone();
        let mut rows = self.rows.clone();
        columns[column] = -old_row;
        rows[row] = -old_column;
        log::info!("Exchanged {old_row} with {old_column} at ({row}, {column})");

        let mut history = self.history.clone();
        history.push(format!(
            "Step: a[{},{}] = {}",
            row + 1,
            column + 1,
            f64_rounded_string(&pivot, 3)
        ));
        history.push(format!(
            "Variable {} moved to the rows as {}, {} moved to the columns as {}",
            old_column,
            rows[row],
            old_row,
            columns[column]
        ));

        Ok(Self {
            matrix,
            columns,
            rows,
            history,
        })
    }
}

impl fmt::Display for JordanTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for label in &self.columns {
            write!(f, "{:>10}", label.to_string())?;
        }
        writeln!(f)?;
        for (label, row) in self.rows.iter().zip(self.matrix.row_iter()) {
            write!(f, "{:>8}", label.to_string())?;
            for el in row.iter() {
                write!(f, "{:>10}", f64_rounded_string(el, 3))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
