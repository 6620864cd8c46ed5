//! Transportation problem: northwest corner (or supplied) plan improved by the method of
//! potentials with stepping-stone cycles.

mod cycle;
mod plan;
mod potentials;

use derive_more::IsVariant;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::{
    config::SolverConfig,
    error::{ensure_finite, ensure_non_negative, InputError, TransportError},
    ensure_eq,
    helpers::f64_rounded_string,
};

pub use cycle::{shift, theta, CycleSearch};
pub use plan::{northwest_corner, spanning_basis, total_cost, validate_plan, Cell, Dummy};
pub use potentials::{entering_cell, Potentials};

use plan::{basis_cells, BalancedProblem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant, Serialize, Deserialize)]
pub enum TransportStatus {
    Optimal,
    /// No cycle closes through the entering cell; the current plan is returned as is.
    Degenerate,
    MaxIterationsExceeded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportStep {
    pub plan: DMatrix<f64>,
    pub potentials: Potentials,
    pub deltas: DMatrix<f64>,
    pub basis: Vec<Cell>,
    pub description: String,
    pub entering: Option<Cell>,
    /// Starts at the entering cell; even positions gain theta, odd positions lose it.
    pub cycle: Vec<Cell>,
    pub theta: Option<f64>,
    /// Cost of `plan`, before this step's shift is applied.
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportReport {
    pub steps: Vec<TransportStep>,
    /// Final plan, including the dummy row or column when one was added.
    pub plan: DMatrix<f64>,
    pub total_cost: f64,
    pub balanced: bool,
    pub dummy: Option<Dummy>,
    pub status: TransportStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportationSolver {
    problem: BalancedProblem,
    plan: DMatrix<f64>,
    basis: DMatrix<bool>,
    supplied: bool,
    epsilon: f64,
    improvement_threshold: f64,
    max_iterations: usize,
}

impl TransportationSolver {
    pub fn new(
        supply: &DVector<f64>,
        demand: &DVector<f64>,
        costs: &DMatrix<f64>,
        initial_plan: Option<&DMatrix<f64>>,
        config: &SolverConfig,
    ) -> Result<Self, TransportError> {
        let epsilon = config.epsilon;
        if supply.is_empty() {
            return Err(InputError::Empty {
                what: "supply".to_owned(),
            })?;
        }
        if demand.is_empty() {
            return Err(InputError::Empty {
                what: "demand".to_owned(),
            })?;
        }
        ensure_eq!(costs.nrows(), supply.len());
        ensure_eq!(costs.ncols(), demand.len());
        ensure_finite("supply", supply.iter())?;
        ensure_finite("demand", demand.iter())?;
        ensure_finite("costs", costs.iter())?;
        ensure_non_negative("supply", supply.iter())?;
        ensure_non_negative("demand", demand.iter())?;

        let problem = BalancedProblem::new(supply, demand, costs, epsilon);
        let (m, n) = problem.shape();
        log::info!("Balanced problem: {m} suppliers, {n} consumers");
        let plan = match initial_plan {
            Some(plan) => {
                ensure_finite("initial plan", plan.iter())?;
                validate_plan(plan, &problem.supply, &problem.demand, epsilon)?;
                plan.clone()
            }
            None => northwest_corner(&problem.supply, &problem.demand, epsilon),
        };
        let basis = spanning_basis(&plan, epsilon)?;

        Ok(Self {
            problem,
            plan,
            basis,
            supplied: initial_plan.is_some(),
            epsilon,
            improvement_threshold: config.transportation.improvement_threshold,
            max_iterations: config.transportation.max_iterations,
        })
    }

    pub fn plan(&self) -> &DMatrix<f64> {
        &self.plan
    }

    pub fn costs(&self) -> &DMatrix<f64> {
        &self.problem.costs
    }

    pub fn total_cost(&self) -> f64 {
        total_cost(&self.plan, &self.problem.costs)
    }

    fn snapshot(&self, potentials: Potentials, deltas: DMatrix<f64>, description: String) -> TransportStep {
        TransportStep {
            plan: self.plan.clone(),
            potentials,
            deltas,
            basis: basis_cells(&self.basis),
            description,
            entering: None,
            cycle: Vec::new(),
            theta: None,
            total_cost: self.total_cost(),
        }
    }

    pub fn solve(mut self) -> TransportReport {
        let costs = self.problem.costs.clone();
        let fmt = |value: f64| f64_rounded_string(&value, 4);

        let potentials = Potentials::new(&costs, &self.basis);
        let deltas = potentials.deltas(&costs);
        let mut steps = vec![self.snapshot(
            potentials,
            deltas,
            format!(
                "Initial basic plan ({}), total cost {}",
                if self.supplied {
                    "supplied"
                } else {
                    "northwest corner"
                },
                fmt(self.total_cost())
            ),
        )];

        let mut iteration = 0;
        let (status, description) = loop {
            let potentials = Potentials::new(&costs, &self.basis);
            let deltas = potentials.deltas(&costs);
            let Some(entering) = entering_cell(&deltas, &self.basis, self.improvement_threshold)
            else {
                break (
                    TransportStatus::Optimal,
                    format!(
                        "Optimal plan: no cell has a positive delta, total cost {}",
                        fmt(self.total_cost())
                    ),
                );
            };
            if iteration == self.max_iterations {
                log::warn!("Iteration limit {} reached", self.max_iterations);
                break (
                    TransportStatus::MaxIterationsExceeded,
                    format!("Stopped after {} iterations", self.max_iterations),
                );
            }
            iteration += 1;
            log::info!("Iteration: {iteration}");

            let Some(cycle) = CycleSearch::new(&self.basis, entering).find() else {
                break (
                    TransportStatus::Degenerate,
                    format!("Iteration {iteration}: no cycle closes through cell {entering}, the plan is degenerate"),
                );
            };
            let Some((theta, leaving)) = theta(&self.plan, &cycle, self.epsilon) else {
                break (
                    TransportStatus::Degenerate,
                    format!("Iteration {iteration}: the cycle through cell {entering} has no losing cell"),
                );
            };
            let leaving = cycle[leaving];
            log::info!("Theta: {theta}, leaving cell: {leaving}");

            let delta = deltas[(entering.row, entering.col)];
            let mut step = self.snapshot(
                potentials,
                deltas,
                format!(
                    "Iteration {iteration}: cell {entering} enters (delta = {}), theta = {}, cell {leaving} leaves",
                    fmt(delta),
                    fmt(theta)
                ),
            );
            step.entering = Some(entering);
            step.cycle = cycle.clone();
            step.theta = Some(theta);
            steps.push(step);

            shift(&mut self.plan, &cycle, theta, self.epsilon);
            self.basis[(leaving.row, leaving.col)] = false;
            self.basis[(entering.row, entering.col)] = true;
            log::debug!("Plan:{}", self.plan);
        };
        log::info!("Transportation finished: {status:?}");

        let potentials = Potentials::new(&costs, &self.basis);
        let deltas = potentials.deltas(&costs);
        steps.push(self.snapshot(potentials, deltas, description));

        let total_cost = self.total_cost();
        let dummy = self.problem.dummy;
        TransportReport {
            steps,
            plan: self.plan,
            total_cost,
            balanced: dummy.is_none(),
            dummy,
            status,
        }
    }
}
