use std::cmp::Ordering;

use nalgebra::{DMatrix, DVector, RowDVector};
use num_traits::Zero;

use crate::{
    config::SolverConfig,
    dbg_display,
    pivot::{eliminate_column, normalize_row},
};

use super::{
    big_number::BigNumber, Direction, Problem, SimplexOutcome, SimplexStep, Variable, VariableRole,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SimplexTable {
    direction: Direction,
    n_structural: usize,
    variables: Vec<Variable>,
    /// Indices of basis vectors
    basis: Vec<usize>,
    /// Constraint rows followed by the right-hand side column
    tableau: DMatrix<f64>,
    objective: RowDVector<BigNumber<f64>>,
    epsilon: f64,
    optimality_threshold: f64,
}

impl SimplexTable {
    pub fn new(problem: Problem, config: &SolverConfig) -> Self {
        let Problem {
            direction,
            n_structural,
            variables,
            tableau,
            objective,
            basis,
        } = problem;
        Self {
            direction,
            n_structural,
            variables,
            basis,
            tableau,
            objective,
            epsilon: config.epsilon,
            optimality_threshold: config.simplex.optimality_threshold,
        }
    }

    fn rhs_column(&self) -> usize {
        self.tableau.ncols() - 1
    }

    pub fn variable(&self, column: usize) -> Variable {
        self.variables[column]
    }

    pub fn basic_variable(&self, row: usize) -> Variable {
        self.variables[self.basis[row]]
    }

    pub fn basis(&self) -> Vec<Variable> {
        self.basis.iter().map(|column| self.variables[*column]).collect()
    }

    pub fn count_role(&self, role: VariableRole) -> usize {
        self.variables.iter().filter(|v| v.role == role).count()
    }

    /// Column with the most negative reduced cost, `None` when the table is optimal.
    pub fn entering_column(&self) -> Option<usize> {
        let pivot_col = (0..self.rhs_column())
            .filter(|j| {
                self.objective[*j].is_negative(self.epsilon, self.optimality_threshold)
            })
            .fold(None, |best: Option<usize>, j| match best {
                Some(best)
                    if self.objective[best].approx_cmp(&self.objective[j], self.epsilon)
                        != Ordering::Greater =>
                {
                    Some(best)
                }
                _ => Some(j),
            });
        log::info!("Pivot column: {pivot_col:?}");
        pivot_col
    }

    /// Minimum-ratio test over rows with a positive entry in `column`.
    pub fn leaving_row(&self, column: usize) -> Option<usize> {
        let rhs = self.rhs_column();
        let pivot_row = (0..self.tableau.nrows())
            .filter(|i| self.tableau[(*i, column)] > self.epsilon)
            .map(|i| (i, self.tableau[(i, rhs)] / self.tableau[(i, column)]))
            .fold(None, |best: Option<(usize, f64)>, (i, ratio)| match best {
                Some((_, best_ratio)) if ratio >= best_ratio - self.epsilon => best,
                _ => Some((i, ratio)),
            })
            .map(|(i, _)| i);
        log::info!("Pivot row: {pivot_row:?}");
        pivot_row
    }

    pub fn pivot(&mut self, row: usize, column: usize) {
        let pivot_el = self.tableau[(row, column)];
        log::info!("Pivot element: {pivot_el}");

        normalize_row(&mut self.tableau, row, pivot_el);
        eliminate_column(&mut self.tableau, row, column, self.epsilon);

        let multiplier = self.objective[column];
        self.objective
            .zip_apply(&self.tableau.row(row), |el, pivot_row_el| {
                *el -= multiplier * pivot_row_el
            });
        self.objective[column] = BigNumber::zero();

        self.basis[row] = column;
        log::debug!("Tableau:{}", self.tableau);
    }

    pub fn snapshot(&self, description: String, pivot: Option<(usize, usize)>) -> SimplexStep {
        SimplexStep {
            variables: self.variables.clone(),
            tableau: self.tableau.clone(),
            objective: self.objective.clone(),
            basis: self.basis(),
            description,
            pivot,
        }
    }

    /// Reads the solution off an optimal table.
    pub fn solution(&self) -> SimplexOutcome {
        let rhs = self.rhs_column();
        let artificial_left = self.basis.iter().enumerate().any(|(row, column)| {
            self.variables[*column].role.is_artificial()
                && self.tableau[(row, rhs)].abs() > self.epsilon
        });
        if artificial_left {
            log::info!("There is no solution");
            return SimplexOutcome::Infeasible;
        }

        let mut variables = DVector::zeros(self.n_structural);
        for (row, column) in self.basis.iter().enumerate() {
            if *column < self.n_structural {
                variables[*column] = self.tableau[(row, rhs)] + 0.;
            }
        }
        let value = dbg_display!(self.objective[rhs]);
        if value.big_part().abs() > self.epsilon {
            log::warn!("Objective value keeps a big part: {value}");
        }
        // `+ 0.` turns a negated zero into `0`
        let objective_value = match self.direction {
            Direction::Maximize => *value.small_part() + 0.,
            Direction::Minimize => -*value.small_part() + 0.,
        };
        log::info!("Optimal solution was found");
        SimplexOutcome::Optimal {
            variables,
            objective_value,
        }
    }
}
