use std::fmt;

use derive_more::IsVariant;
use derive_new::new;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::{ensure_eq, error::InputError, helpers::f64_fixed_string};

const PARAMETERS: [char; 8] = ['α', 'β', 'γ', 'δ', 'ε', 'ζ', 'η', 'θ'];

/// Name of the `index`-th free parameter: Greek letters first, then `t8`, `t9`, ...
pub fn parameter_name(index: usize) -> String {
    PARAMETERS
        .get(index)
        .map_or_else(|| format!("t{index}"), char::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IsVariant)]
pub enum GaussOutcome {
    Unique(DVector<f64>),
    Parametric(ParametricSolution),
    Inconsistent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct FreeVariable {
    pub column: usize,
    pub parameter: String,
}

/// `x[column] = constant + Σ coefficient · parameter[k]` over `(k, coefficient)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct BasicVariable {
    pub column: usize,
    pub constant: f64,
    pub coefficients: Vec<(usize, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct ParametricSolution {
    n_variables: usize,
    free_variables: Vec<FreeVariable>,
    basic_variables: Vec<BasicVariable>,
}

impl ParametricSolution {
    pub fn free_variables(&self) -> &[FreeVariable] {
        &self.free_variables
    }

    pub fn basic_variables(&self) -> &[BasicVariable] {
        &self.basic_variables
    }

    /// Plugs concrete values into the free parameters.
    pub fn evaluate(&self, parameters: &[f64]) -> Result<DVector<f64>, InputError> {
        ensure_eq!(parameters.len(), self.free_variables.len());

        let mut values = DVector::zeros(self.n_variables);
        for (free, value) in self.free_variables.iter().zip(parameters) {
            values[free.column] = *value;
        }
        for basic in &self.basic_variables {
            values[basic.column] = basic.constant
                + basic
                    .coefficients
                    .iter()
                    .map(|(k, coefficient)| coefficient * parameters[*k])
                    .sum::<f64>();
        }
        Ok(values)
    }
}

impl fmt::Display for ParametricSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for free in &self.free_variables {
            writeln!(f, "x{} = {}", free.column + 1, free.parameter)?;
        }
        for basic in &self.basic_variables {
            write!(
                f,
                "x{} = {}",
                basic.column + 1,
                f64_fixed_string(&basic.constant, 4)
            )?;
            for (k, coefficient) in &basic.coefficients {
                write!(
                    f,
                    " {}{}{}",
                    if *coefficient > 0. { "+" } else { "" },
                    f64_fixed_string(coefficient, 4),
                    self.free_variables[*k].parameter
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
