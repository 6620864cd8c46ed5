//! Big-M simplex method on a dense tableau.

mod big_number;
mod problem;
mod table;
mod variable;

use std::borrow::Cow;

use derive_more::IsVariant;
use nalgebra::{DMatrix, DVector, RowDVector};
use serde::{Deserialize, Serialize};

pub use big_number::BigNumber;
pub use problem::*;
pub use table::SimplexTable;
pub use variable::{Variable, VariableRole};

#[derive(Debug, Clone, PartialEq, IsVariant, Serialize, Deserialize)]
pub enum SimplexOutcome {
    Optimal {
        variables: DVector<f64>,
        objective_value: f64,
    },
    Unbounded,
    Infeasible,
    MaxIterationsExceeded,
}

impl SimplexOutcome {
    pub fn as_str(&self) -> Cow<'static, str> {
        match self {
            SimplexOutcome::Optimal {
                variables,
                objective_value,
            } => format!(
                "Variables: {}\nObjective value: {objective_value}",
                variables
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
            .into(),
            SimplexOutcome::Unbounded => "The objective is unbounded".into(),
            SimplexOutcome::Infeasible => "The problem has no feasible solution".into(),
            SimplexOutcome::MaxIterationsExceeded => "Iteration limit exceeded".into(),
        }
    }
}

/// Snapshot of the simplex table, taken before a pivot or at the end of the solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplexStep {
    pub variables: Vec<Variable>,
    /// Constraint rows; the last column is the right-hand side.
    pub tableau: DMatrix<f64>,
    /// Objective row with the same layout as `tableau`.
    pub objective: RowDVector<BigNumber<f64>>,
    pub basis: Vec<Variable>,
    pub description: String,
    /// `(row, column)` of the pivot applied right after this snapshot.
    pub pivot: Option<(usize, usize)>,
}

impl SimplexStep {
    /// Objective row on top of the constraint rows, with `big_m` substituted for `M`.
    pub fn flatten(&self, big_m: f64) -> DMatrix<f64> {
        DMatrix::from_fn(self.tableau.nrows() + 1, self.tableau.ncols(), |i, j| {
            if i == 0 {
                self.objective[j].evaluate(big_m)
            } else {
                self.tableau[(i - 1, j)]
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplexReport {
    pub steps: Vec<SimplexStep>,
    pub outcome: SimplexOutcome,
}

#[cfg(test)]
mod tests;
