use std::{
    fmt,
    ops::{Mul, MulAssign},
};

use derive_more::{Display, IsVariant};
use derive_new::new;
use nalgebra::{DMatrix, RowDVector};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{
    config::{SimplexConfig, SolverConfig},
    error::{ensure_finite, InputError},
};

use super::{
    big_number::BigNumber, SimplexOutcome, SimplexReport, SimplexTable, Variable, VariableRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant, Serialize, Deserialize)]
pub enum Direction {
    #[display(fmt = "max")]
    Maximize,
    #[display(fmt = "min")]
    Minimize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct ObjectiveFunction {
    pub(crate) coefficients: RowDVector<f64>,
    pub(crate) direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct Constraint {
    pub(crate) coefficients: RowDVector<f64>,
    pub(crate) sign: Sign,
    pub(crate) rhs: f64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, IsVariant, Serialize, Deserialize,
)]
pub enum Sign {
    #[display(fmt = "<=")]
    Less = -1,
    #[display(fmt = "=")]
    Equals = 0,
    #[display(fmt = ">=")]
    Greater = 1,
}

fn write_linear_form(f: &mut fmt::Formatter<'_>, coefficients: &RowDVector<f64>) -> fmt::Result {
    let mut first = true;
    for (j, coefficient) in coefficients.iter().enumerate().filter(|(_, c)| !c.is_zero()) {
        match (first, *coefficient < 0.) {
            (true, true) => write!(f, "-")?,
            (true, false) => {}
            (false, true) => write!(f, " - ")?,
            (false, false) => write!(f, " + ")?,
        }
        write!(f, "{}x{}", coefficient.abs(), j + 1)?;
        first = false;
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

impl fmt::Display for ObjectiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} z = ", self.direction)?;
        write_linear_form(f, &self.coefficients)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_linear_form(f, &self.coefficients)?;
        write!(f, " {} {}", self.sign, self.rhs)
    }
}

/// A linear program in standard form, ready to be put into a simplex table.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub(crate) direction: Direction,
    pub(crate) n_structural: usize,
    /// One entry per tableau column, right-hand side excluded.
    pub(crate) variables: Vec<Variable>,
    /// Constraint rows; the last column holds the right-hand side.
    pub(crate) tableau: DMatrix<f64>,
    /// Reduced costs of the internal maximization, with the `M` part kept symbolic.
    pub(crate) objective: RowDVector<BigNumber<f64>>,
    pub(crate) basis: Vec<usize>,
}

impl Problem {
    pub fn new(
        objective_function: ObjectiveFunction,
        constraints: Vec<Constraint>,
        config: &SimplexConfig,
    ) -> Result<Self, InputError> {
        Self::normalize(
            objective_function,
            constraints,
            config.normalize_negative_rhs,
        )
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn tableau(&self) -> &DMatrix<f64> {
        &self.tableau
    }

    pub fn objective(&self) -> &RowDVector<BigNumber<f64>> {
        &self.objective
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    pub fn solve(self, config: &SolverConfig) -> SimplexReport {
        let max_iterations = config.simplex.max_iterations;
        let mut table = SimplexTable::new(self, config);
        let n_artificial = table.count_role(VariableRole::Artificial);
        let mut steps = vec![table.snapshot(
            if n_artificial > 0 {
                format!("Initial simplex table ({n_artificial} artificial variables with coefficient M)")
            } else {
                "Initial simplex table".to_owned()
            },
            None,
        )];

        let mut iteration = 0;
        let (outcome, description) = loop {
            let Some(column) = table.entering_column() else {
                let outcome = table.solution();
                let description = match outcome {
                    SimplexOutcome::Infeasible => {
                        "Artificial variables remain in the basis: no feasible solution".to_owned()
                    }
                    _ => "Optimal solution found: no negative entries in the objective row"
                        .to_owned(),
                };
                break (outcome, description);
            };
            if iteration == max_iterations {
                log::warn!("Iteration limit {max_iterations} reached");
                break (
                    SimplexOutcome::MaxIterationsExceeded,
                    format!("Stopped after {max_iterations} iterations"),
                );
            }
            iteration += 1;
            log::info!("Iteration: {iteration}");

            let entering = table.variable(column);
            let Some(row) = table.leaving_row(column) else {
                log::info!("No leaving row for {entering}");
                break (
                    SimplexOutcome::Unbounded,
                    format!("Objective is unbounded: column {entering} has no positive entry"),
                );
            };
            let leaving = table.basic_variable(row);
            steps.push(table.snapshot(
                format!(
                    "Iteration {iteration}: pivot at row {}, column {}; {entering} enters, {leaving} leaves",
                    row + 1,
                    column + 1
                ),
                Some((row, column)),
            ));
            table.pivot(row, column);
        };
        log::info!("Simplex finished: {}", outcome.as_str());

        steps.push(table.snapshot(description, None));
        SimplexReport { steps, outcome }
    }

    #[inline]
    fn normalize(
        objective_function: ObjectiveFunction,
        mut constraints: Vec<Constraint>,
        normalize_negative_rhs: bool,
    ) -> Result<Self, InputError> {
        ensure_finite("objective function", objective_function.coefficients.iter())?;
        for (i, constraint) in constraints.iter_mut().enumerate() {
            ensure_finite(
                "constraint",
                constraint
                    .coefficients
                    .iter()
                    .chain(std::iter::once(&constraint.rhs)),
            )?;
            if constraint.rhs < 0. {
                if !normalize_negative_rhs {
                    return Err(InputError::NegativeRhs {
                        row: i,
                        value: constraint.rhs,
                    });
                }
                // Reverse sign on constraints with negative rhs
                *constraint *= -1.;
            }
        }

        let n = objective_function.coefficients.len();
        if let Some((i, constraint)) = constraints
            .iter()
            .enumerate()
            .find(|(_, constraint)| constraint.coefficients.len() > n)
        {
            return Err(InputError::DimensionMismatch {
                what: format!("constraint {i} is longer than the objective function"),
                left: constraint.coefficients.len().to_string(),
                right: n.to_string(),
            });
        }
        if n == 0 {
            return Err(InputError::Empty {
                what: "objective function".to_owned(),
            });
        }
        let pad = |coefficients: &RowDVector<f64>| {
            RowDVector::from_fn(n, |_, j| coefficients.get(j).copied().unwrap_or(0.))
        };

        let count = |sign: Sign| constraints.iter().filter(|c| c.sign == sign).count();
        let n_slack = count(Sign::Less);
        let n_surplus = count(Sign::Greater);
        let n_artificial = n_surplus + count(Sign::Equals);
        let variables: Vec<Variable> = [
            (VariableRole::Structural, n),
            (VariableRole::Slack, n_slack),
            (VariableRole::Surplus, n_surplus),
            (VariableRole::Artificial, n_artificial),
        ]
        .into_iter()
        .flat_map(|(role, count)| (0..count).map(move |ordinal| Variable::new(role, ordinal)))
        .collect();
        let total = variables.len();

        // Inserting compensating and artificial variables
        let mut tableau = DMatrix::zeros(constraints.len(), total + 1);
        let mut basis = Vec::with_capacity(constraints.len());
        let mut slack = n;
        let mut surplus = n + n_slack;
        let mut artificial = n + n_slack + n_surplus;
        for (i, constraint) in constraints.iter().enumerate() {
            for (j, coefficient) in pad(&constraint.coefficients).iter().enumerate() {
                tableau[(i, j)] = *coefficient;
            }
            tableau[(i, total)] = constraint.rhs;
            match constraint.sign {
                Sign::Less => {
                    tableau[(i, slack)] = 1.;
                    basis.push(slack);
                    slack += 1;
                }
                Sign::Greater => {
                    tableau[(i, surplus)] = -1.;
                    tableau[(i, artificial)] = 1.;
                    basis.push(artificial);
                    surplus += 1;
                    artificial += 1;
                }
                Sign::Equals => {
                    tableau[(i, artificial)] = 1.;
                    basis.push(artificial);
                    artificial += 1;
                }
            }
        }

        let coefficients = pad(&objective_function.coefficients);
        let direction = objective_function.direction;
        let mut objective = RowDVector::from_fn(total + 1, |_, j| {
            if j < n {
                BigNumber::from(if direction.is_maximize() {
                    -coefficients[j]
                } else {
                    coefficients[j]
                })
            } else if j < total && variables[j].role.is_artificial() {
                BigNumber::one_big()
            } else {
                BigNumber::zero()
            }
        });
        // Artificial variables start in the basis, so their reduced costs must be zero
        for (i, column) in basis.iter().enumerate() {
            if variables[*column].role.is_artificial() {
                objective.zip_apply(&tableau.row(i), |el, row_el| *el -= BigNumber::big(row_el));
            }
        }

        Ok(Self {
            direction,
            n_structural: n,
            variables,
            tableau,
            objective,
            basis,
        })
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Problem ({}) {{", self.direction)?;
        write!(f, "    variables:")?;
        for variable in &self.variables {
            write!(f, " {variable}")?;
        }
        writeln!(f)?;
        write!(f, "    objective:")?;
        for el in self.objective.iter() {
            write!(f, " {el}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "    tableau:\n{}",
            self.tableau
                .to_string()
                .trim()
                .lines()
                .map(|l| format!("    {}\n", l.trim()))
                .collect::<String>()
        )?;
        write!(f, "}}")
    }
}

impl Mul<f64> for Sign {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        if rhs >= 0. {
            return self;
        }
        match self {
            Sign::Less => Sign::Greater,
            Sign::Equals => self,
            Sign::Greater => Sign::Less,
        }
    }
}

impl MulAssign<f64> for Sign {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Mul<f64> for Constraint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            coefficients: self.coefficients * rhs,
            rhs: self.rhs * rhs,
            sign: self.sign * rhs,
        }
    }
}

impl MulAssign<f64> for Constraint {
    fn mul_assign(&mut self, rhs: f64) {
        self.coefficients *= rhs;
        self.rhs *= rhs;
        self.sign *= rhs;
    }
}

#[cfg(test)]
mod tests;
