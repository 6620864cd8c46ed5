use nalgebra::DMatrix;

use super::plan::Cell;

/// Depth-first search for the closed path of basic cells through `entering`.
///
/// Moves strictly alternate between staying in a column and staying in a row, so every turn of
/// the path is a corner. The returned path starts at `entering`, has an even length of at least
/// four and visits each cell once.
pub struct CycleSearch<'a> {
    basis: &'a DMatrix<bool>,
    entering: Cell,
    path: Vec<Cell>,
    used: DMatrix<bool>,
}

impl<'a> CycleSearch<'a> {
    pub fn new(basis: &'a DMatrix<bool>, entering: Cell) -> Self {
        let mut used = DMatrix::from_element(basis.nrows(), basis.ncols(), false);
        used[(entering.row, entering.col)] = true;
        Self {
            basis,
            entering,
            path: vec![entering],
            used,
        }
    }

    pub fn find(mut self) -> Option<Vec<Cell>> {
        // column move first, then row move first
        for along_row in [false, true] {
            if self.extend(along_row) {
                log::info!(
                    "Cycle: {}",
                    self.path
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" -> ")
                );
                return Some(self.path);
            }
        }
        log::warn!("No cycle through {}", self.entering);
        None
    }

    fn closes(&self, cell: Cell) -> bool {
        cell == self.entering && self.path.len() >= 4 && self.path.len() % 2 == 0
    }

    fn extend(&mut self, along_row: bool) -> bool {
        let Some(&last) = self.path.last() else {
            return false;
        };
        let candidates: Vec<Cell> = if along_row {
            (0..self.basis.ncols())
                .filter(|j| *j != last.col)
                .map(|j| Cell::new(last.row, j))
                .collect()
        } else {
            (0..self.basis.nrows())
                .filter(|i| *i != last.row)
                .map(|i| Cell::new(i, last.col))
                .collect()
        };

        for cell in candidates {
            if self.closes(cell) {
                return true;
            }
            if self.used[(cell.row, cell.col)] || !self.basis[(cell.row, cell.col)] {
                continue;
            }
            self.used[(cell.row, cell.col)] = true;
            self.path.push(cell);
            if self.extend(!along_row) {
                return true;
            }
            self.path.pop();
            self.used[(cell.row, cell.col)] = false;
        }
        false
    }
}

/// Smallest shipment on the odd (losing) positions of the cycle, with the position that leaves.
///
/// The leaving position is the first odd one whose value is within `epsilon` of theta.
pub fn theta(plan: &DMatrix<f64>, cycle: &[Cell], epsilon: f64) -> Option<(f64, usize)> {
    let value = |k: usize| plan[(cycle[k].row, cycle[k].col)];
    let theta = (1..cycle.len())
        .step_by(2)
        .map(value)
        .min_by(f64::total_cmp)?;
    let leaving = (1..cycle.len())
        .step_by(2)
        .find(|k| value(*k) - theta <= epsilon)?;
    Some((theta, leaving))
}

/// Moves `theta` around the cycle: even positions gain, odd positions lose.
pub fn shift(plan: &mut DMatrix<f64>, cycle: &[Cell], theta: f64, epsilon: f64) {
    for (k, cell) in cycle.iter().enumerate() {
        let value = &mut plan[(cell.row, cell.col)];
        if k % 2 == 0 {
            *value += theta;
        } else {
            *value -= theta;
        }
        if *value < epsilon {
            *value = 0.;
        }
    }
}
