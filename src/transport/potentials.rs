use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::plan::Cell;

/// Dual values with `u[i] + v[j] = cost[i][j]` on every basic cell and `u[0] = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Potentials {
    pub u: DVector<f64>,
    pub v: DVector<f64>,
}

impl Potentials {
    pub fn new(costs: &DMatrix<f64>, basis: &DMatrix<bool>) -> Self {
        let (m, n) = costs.shape();
        let mut u = vec![None; m];
        let mut v = vec![None; n];
        if let Some(first) = u.first_mut() {
            *first = Some(0.);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..m {
                for j in 0..n {
                    if !basis[(i, j)] {
                        continue;
                    }
                    match (u[i], v[j]) {
                        (Some(ui), None) => {
                            v[j] = Some(costs[(i, j)] - ui);
                            changed = true;
                        }
                        (None, Some(vj)) => {
                            u[i] = Some(costs[(i, j)] - vj);
                            changed = true;
                        }
                        _ => {}
                    }
                }
            }
        }
        if u.iter().chain(v.iter()).any(Option::is_none) {
            log::warn!("Basis does not connect every supplier and consumer");
        }

        Self {
            u: DVector::from_iterator(m, u.into_iter().map(Option::unwrap_or_default)),
            v: DVector::from_iterator(n, v.into_iter().map(Option::unwrap_or_default)),
        }
    }

    /// Reduced costs `u[i] + v[j] - cost[i][j]`; a positive value marks an improving cell.
    pub fn deltas(&self, costs: &DMatrix<f64>) -> DMatrix<f64> {
        DMatrix::from_fn(costs.nrows(), costs.ncols(), |i, j| {
            self.u[i] + self.v[j] - costs[(i, j)]
        })
    }
}

/// The non-basic cell with the largest delta above `threshold`, first in row-major order on ties.
pub fn entering_cell(deltas: &DMatrix<f64>, basis: &DMatrix<bool>, threshold: f64) -> Option<Cell> {
    let (m, n) = deltas.shape();
    let entering = (0..m)
        .flat_map(|i| (0..n).map(move |j| Cell::new(i, j)))
        .filter(|cell| !basis[(cell.row, cell.col)])
        .map(|cell| (cell, deltas[(cell.row, cell.col)]))
        .filter(|(_, delta)| *delta > threshold)
        .fold(None, |best: Option<(Cell, f64)>, (cell, delta)| match best {
            Some((_, best_delta)) if delta <= best_delta => best,
            _ => Some((cell, delta)),
        })
        .map(|(cell, _)| cell);
    log::info!("Entering cell: {entering:?}");
    entering
}
