use std::fmt;

use derive_more::{Display, IsVariant};
use derive_new::new;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// A cell of the plan, addressed by supplier row and consumer column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row + 1, self.col + 1)
    }
}

/// Zero-cost participant appended to balance total supply against total demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant, Serialize, Deserialize)]
pub enum Dummy {
    /// Extra column absorbing surplus supply.
    #[display(fmt = "dummy consumer")]
    Consumer,
    /// Extra row covering surplus demand.
    #[display(fmt = "dummy supplier")]
    Supplier,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BalancedProblem {
    pub supply: DVector<f64>,
    pub demand: DVector<f64>,
    pub costs: DMatrix<f64>,
    pub dummy: Option<Dummy>,
}

impl BalancedProblem {
    pub fn new(
        supply: &DVector<f64>,
        demand: &DVector<f64>,
        costs: &DMatrix<f64>,
        epsilon: f64,
    ) -> Self {
        let gap = supply.sum() - demand.sum();
        if gap > epsilon {
            log::info!("Supply exceeds demand by {gap}, adding a dummy consumer");
            Self {
                supply: supply.clone(),
                demand: demand.clone().insert_row(demand.len(), gap),
                costs: costs.clone().insert_column(costs.ncols(), 0.),
                dummy: Some(Dummy::Consumer),
            }
        } else if gap < -epsilon {
            log::info!("Demand exceeds supply by {}, adding a dummy supplier", -gap);
            Self {
                supply: supply.clone().insert_row(supply.len(), -gap),
                demand: demand.clone(),
                costs: costs.clone().insert_row(costs.nrows(), 0.),
                dummy: Some(Dummy::Supplier),
            }
        } else {
            Self {
                supply: supply.clone(),
                demand: demand.clone(),
                costs: costs.clone(),
                dummy: None,
            }
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.costs.shape()
    }
}

/// Northwest corner rule: fill cells from the top-left, moving down on exhausted supply and
/// right on exhausted demand.
pub fn northwest_corner(supply: &DVector<f64>, demand: &DVector<f64>, epsilon: f64) -> DMatrix<f64> {
    let (m, n) = (supply.len(), demand.len());
    let mut supply = supply.clone();
    let mut demand = demand.clone();
    let mut plan = DMatrix::zeros(m, n);
    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        let shipped = supply[i].min(demand[j]);
        plan[(i, j)] = shipped;
        supply[i] -= shipped;
        demand[j] -= shipped;
        match (supply[i] < epsilon, demand[j] < epsilon) {
            (true, true) => {
                i += 1;
                j += 1;
            }
            (true, false) => i += 1,
            _ => j += 1,
        }
    }
    log::debug!("Northwest corner plan:{plan}");
    plan
}

/// Checks that a supplied plan ships exactly the supply of every row and the demand of every
/// column.
pub fn validate_plan(
    plan: &DMatrix<f64>,
    supply: &DVector<f64>,
    demand: &DVector<f64>,
    epsilon: f64,
) -> Result<(), TransportError> {
    let infeasible = |reason: String| {
        log::warn!("Rejected initial plan: {reason}");
        Err(TransportError::Infeasible { reason })
    };

    if plan.shape() != (supply.len(), demand.len()) {
        return infeasible(format!(
            "plan is {}x{}, expected {}x{}",
            plan.nrows(),
            plan.ncols(),
            supply.len(),
            demand.len()
        ));
    }
    if let Some(((i, j), value)) = plan
        .iter()
        .enumerate()
        .map(|(k, value)| ((k % plan.nrows(), k / plan.nrows()), value))
        .find(|(_, value)| **value < -epsilon)
    {
        return infeasible(format!("cell [{},{}] is negative: {value}", i + 1, j + 1));
    }
    for (i, (row, expected)) in plan.row_iter().zip(supply.iter()).enumerate() {
        let shipped = row.sum();
        if (shipped - expected).abs() > epsilon {
            return infeasible(format!(
                "row {} ships {shipped}, supply is {expected}",
                i + 1
            ));
        }
    }
    for (j, (column, expected)) in plan.column_iter().zip(demand.iter()).enumerate() {
        let received = column.sum();
        if (received - expected).abs() > epsilon {
            return infeasible(format!(
                "column {} receives {received}, demand is {expected}",
                j + 1
            ));
        }
    }
    Ok(())
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Returns `false` when both nodes were already connected.
    fn union(&mut self, x: usize, y: usize) -> bool {
        let px = self.find(x);
        let py = self.find(y);
        if px == py {
            return false;
        }
        match self.rank[px].cmp(&self.rank[py]) {
            std::cmp::Ordering::Less => self.parent[px] = py,
            std::cmp::Ordering::Greater => self.parent[py] = px,
            std::cmp::Ordering::Equal => {
                self.parent[py] = px;
                self.rank[px] += 1;
            }
        }
        true
    }
}

/// Basis of a plan: its positive cells, completed with zero cells to a spanning tree over the
/// supplier and consumer nodes.
///
/// Rows are nodes `0..m`, columns are nodes `m..m + n`; a cell joins its row and column.
pub fn spanning_basis(plan: &DMatrix<f64>, epsilon: f64) -> Result<DMatrix<bool>, TransportError> {
    let (m, n) = plan.shape();
    let mut nodes = UnionFind::new(m + n);
    let mut basis = DMatrix::from_element(m, n, false);
    let mut size = 0;

    for i in 0..m {
        for j in 0..n {
            if plan[(i, j)] > epsilon {
                if !nodes.union(i, m + j) {
                    log::warn!("Occupied cell {} closes a cycle", Cell::new(i, j));
                    return Err(TransportError::NotBasic);
                }
                basis[(i, j)] = true;
                size += 1;
            }
        }
    }

    let target = (m + n).saturating_sub(1);
    if size < target {
        log::info!("Degenerate plan: {size} occupied cells, completing the basis to {target}");
    }
    for i in 0..m {
        for j in 0..n {
            if size == target {
                return Ok(basis);
            }
            if !basis[(i, j)] && nodes.union(i, m + j) {
                basis[(i, j)] = true;
                size += 1;
            }
        }
    }
    Ok(basis)
}

pub fn basis_cells(basis: &DMatrix<bool>) -> Vec<Cell> {
    let (m, n) = basis.shape();
    (0..m)
        .flat_map(|i| (0..n).map(move |j| Cell::new(i, j)))
        .filter(|cell| basis[(cell.row, cell.col)])
        .collect()
}

pub fn total_cost(plan: &DMatrix<f64>, costs: &DMatrix<f64>) -> f64 {
    plan.component_mul(costs).sum()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn northwest_corner_walks_the_staircase() {
        let plan = northwest_corner(
            &DVector::from_row_slice(&[15., 15., 15., 15.]),
            &DVector::from_row_slice(&[11., 11., 11., 11., 16.]),
            EPS,
        );
        assert_eq!(
            plan,
            DMatrix::from_row_slice(
                4,
                5,
                &[
                    11., 4., 0., 0., 0., //
                    0., 7., 8., 0., 0., //
                    0., 0., 3., 11., 1., //
                    0., 0., 0., 0., 15., //
                ]
            )
        );
    }

    #[test]
    fn simultaneous_exhaustion_moves_diagonally() {
        let plan = northwest_corner(
            &DVector::from_row_slice(&[10., 10.]),
            &DVector::from_row_slice(&[10., 10.]),
            EPS,
        );
        assert_eq!(plan, DMatrix::from_row_slice(2, 2, &[10., 0., 0., 10.]));

        let basis = spanning_basis(&plan, EPS).unwrap();
        assert_eq!(
            basis_cells(&basis),
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    #[test]
    fn balancing_adds_dummy_participants() {
        let costs = DMatrix::from_row_slice(2, 2, &[1., 2., 3., 4.]);
        let surplus_supply = BalancedProblem::new(
            &DVector::from_row_slice(&[30., 20.]),
            &DVector::from_row_slice(&[10., 10.]),
            &costs,
            EPS,
        );
        assert_eq!(surplus_supply.dummy, Some(Dummy::Consumer));
        assert_eq!(surplus_supply.shape(), (2, 3));
        assert_eq!(surplus_supply.demand[2], 30.);
        assert_eq!(surplus_supply.costs.column(2).sum(), 0.);

        let surplus_demand = BalancedProblem::new(
            &DVector::from_row_slice(&[5., 5.]),
            &DVector::from_row_slice(&[10., 10.]),
            &costs,
            EPS,
        );
        assert_eq!(surplus_demand.dummy, Some(Dummy::Supplier));
        assert_eq!(surplus_demand.shape(), (3, 2));
        assert_eq!(surplus_demand.supply[2], 10.);
    }

    #[test]
    fn plan_validation() {
        let supply = DVector::from_row_slice(&[10., 10.]);
        let demand = DVector::from_row_slice(&[15., 5.]);
        let valid = DMatrix::from_row_slice(2, 2, &[10., 0., 5., 5.]);
        assert_eq!(validate_plan(&valid, &supply, &demand, EPS), Ok(()));

        let short_row = DMatrix::from_row_slice(2, 2, &[9., 0., 6., 5.]);
        assert_eq!(
            validate_plan(&short_row, &supply, &demand, EPS),
            Err(TransportError::Infeasible {
                reason: "row 1 ships 9, supply is 10".to_owned()
            })
        );

        let negative = DMatrix::from_row_slice(2, 2, &[10., 0., 16., -1.]);
        assert!(matches!(
            validate_plan(&negative, &supply, &demand, EPS),
            Err(TransportError::Infeasible { reason }) if reason.contains("[2,2]")
        ));

        let wrong_shape = DMatrix::from_row_slice(1, 2, &[15., 5.]);
        assert!(validate_plan(&wrong_shape, &supply, &demand, EPS).is_err());
    }

    #[test]
    fn occupied_cycle_is_not_basic() {
        let plan = DMatrix::from_row_slice(2, 2, &[5., 5., 5., 5.]);
        assert_eq!(spanning_basis(&plan, EPS), Err(TransportError::NotBasic));
    }

    #[test]
    fn cost_is_elementwise() {
        let plan = DMatrix::from_row_slice(2, 2, &[10., 0., 5., 15.]);
        let costs = DMatrix::from_row_slice(2, 2, &[4., 1., 2., 3.]);
        assert_eq!(total_cost(&plan, &costs), 95.);
    }
}
