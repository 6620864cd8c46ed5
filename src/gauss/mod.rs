//! Gauss-Jordan elimination with partial pivoting for rectangular augmented matrices.

mod solution;

use derive_more::IsVariant;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

pub use solution::*;

use crate::{
    error::InputError,
    helpers::f64_rounded_string,
    pivot::{eliminate_column, normalize_row},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, IsVariant)]
pub enum GaussStepKind {
    Initial,
    RowSwap { first: usize, second: usize },
    Normalize { row: usize, pivot: f64 },
    Eliminate { row: usize, column: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussStep {
    pub kind: GaussStepKind,
    pub matrix: DMatrix<f64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussJordanReport {
    pub steps: Vec<GaussStep>,
    pub outcome: GaussOutcome,
    pub rank: usize,
    pub pivot_columns: Vec<usize>,
}

/// Solver state for one augmented matrix `[A | b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussJordan {
    matrix: DMatrix<f64>,
    epsilon: f64,
    steps: Vec<GaussStep>,
}

impl GaussJordan {
    /// `augmented` must have a row and at least one coefficient column next to the right-hand
    /// side.
    pub fn new(augmented: DMatrix<f64>, epsilon: f64) -> Result<Self, InputError> {
        if augmented.nrows() == 0 || augmented.ncols() < 2 {
            return Err(InputError::Empty {
                what: "augmented matrix".to_owned(),
            });
        }
        Ok(Self {
            matrix: augmented,
            epsilon,
            steps: Vec::new(),
        })
    }

    fn record(&mut self, kind: GaussStepKind, description: String) {
        log::debug!("{description}:{}", self.matrix);
        self.steps.push(GaussStep {
            kind,
            matrix: self.matrix.clone(),
            description,
        });
    }

    /// Row with the largest magnitude in `column` among `from..`; the first one wins on ties.
    fn pivot_row(&self, column: usize, from: usize) -> usize {
        (from + 1..self.matrix.nrows()).fold(from, |best, row| {
            if self.matrix[(row, column)].abs() > self.matrix[(best, column)].abs() {
                row
            } else {
                best
            }
        })
    }

    pub fn solve(mut self) -> GaussJordanReport {
        let m = self.matrix.nrows();
        let n = self.matrix.ncols() - 1;
        self.record(
            GaussStepKind::Initial,
            "Initial augmented matrix".to_owned(),
        );

        let mut current_row = 0;
        let mut pivot_columns = Vec::with_capacity(n.min(m));
        for column in 0..n {
            if current_row >= m {
                break;
            }
            let max_row = self.pivot_row(column, current_row);
            if self.matrix[(max_row, column)].abs() < self.epsilon {
                log::info!("Column {column} has no pivot");
                continue;
            }

            if max_row != current_row {
                self.matrix.swap_rows(current_row, max_row);
                self.record(
                    GaussStepKind::RowSwap {
                        first: current_row,
                        second: max_row,
                    },
                    format!("Swap rows {} and {}", current_row + 1, max_row + 1),
                );
            }

            pivot_columns.push(column);
            let pivot = self.matrix[(current_row, column)];
            normalize_row(&mut self.matrix, current_row, pivot);
            self.record(
                GaussStepKind::Normalize {
                    row: current_row,
                    pivot,
                },
                format!(
                    "Normalize row {} (divide by {})",
                    current_row + 1,
                    f64_rounded_string(&pivot, 4)
                ),
            );

            eliminate_column(&mut self.matrix, current_row, column, self.epsilon);
            self.record(
                GaussStepKind::Eliminate {
                    row: current_row,
                    column,
                },
                format!("Eliminate column {}", column + 1),
            );

            current_row += 1;
        }
        let rank = pivot_columns.len();
        log::info!("Rank: {rank}, pivot columns: {pivot_columns:?}");

        let outcome = self.classify(current_row, &pivot_columns);
        log::info!("Outcome: {outcome:?}");
        GaussJordanReport {
            steps: self.steps,
            outcome,
            rank,
            pivot_columns,
        }
    }

    fn classify(&self, current_row: usize, pivot_columns: &[usize]) -> GaussOutcome {
        let n = self.matrix.ncols() - 1;
        let contradiction = (current_row..self.matrix.nrows()).any(|i| {
            let row = self.matrix.row(i);
            row.columns(0, n).iter().all(|el| el.abs() <= self.epsilon)
                && row[n].abs() > self.epsilon
        });
        if contradiction {
            return GaussOutcome::Inconsistent;
        }

        let free_columns: Vec<usize> = (0..n).filter(|j| !pivot_columns.contains(j)).collect();
        if free_columns.is_empty() {
            let mut values = DVector::zeros(n);
            for (row, column) in pivot_columns.iter().enumerate() {
                values[*column] = self.matrix[(row, n)];
            }
            return GaussOutcome::Unique(values);
        }

        let free_variables = free_columns
            .iter()
            .enumerate()
            .map(|(k, column)| FreeVariable::new(*column, parameter_name(k)))
            .collect();
        let basic_variables = pivot_columns
            .iter()
            .enumerate()
            .map(|(row, column)| {
                let coefficients = free_columns
                    .iter()
                    .enumerate()
                    .map(|(k, free)| (k, -self.matrix[(row, *free)]))
                    .filter(|(_, coefficient)| coefficient.abs() > self.epsilon)
                    .collect();
                BasicVariable::new(*column, self.matrix[(row, n)], coefficients)
            })
            .collect();
        GaussOutcome::Parametric(ParametricSolution::new(n, free_variables, basic_variables))
    }
}
