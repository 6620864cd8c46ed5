use nalgebra::{DMatrix, DVector};

use crate::{
    config::SolverConfig,
    ensure_eq,
    error::{ensure_finite, InputError, PivotError, TransportError},
    gauss::{GaussJordan, GaussJordanReport},
    jordan::JordanTable,
    simplex::{Constraint, ObjectiveFunction, Problem, SimplexReport},
    transport::{TransportReport, TransportationSolver},
};

/// One modified Jordan exchange on `table`; the table itself is left untouched.
pub fn jordan_pivot(
    table: &JordanTable,
    row: usize,
    column: usize,
    config: &SolverConfig,
) -> Result<JordanTable, PivotError> {
    log::info!("Received input:\ntable:\n{table}\nrow: {row}\ncolumn: {column}");

    let table = table.exchange(row, column, config.epsilon)?;
    log::info!("Exchanged table:\n{table}");
    Ok(table)
}

/// Gauss-Jordan elimination of an `rows x (cols + 1)` augmented matrix.
pub fn gauss_jordan_solve(
    augmented: &DMatrix<f64>,
    rows: usize,
    cols: usize,
    config: &SolverConfig,
) -> Result<GaussJordanReport, InputError> {
    log::info!("Received input:\naugmented:{augmented}\nrows: {rows}\ncols: {cols}");

    if rows == 0 || cols == 0 {
        return Err(InputError::Empty {
            what: "augmented matrix".to_owned(),
        });
    }
    ensure_eq!(augmented.nrows(), rows);
    ensure_eq!(augmented.ncols(), cols + 1);
    ensure_finite("augmented matrix", augmented.iter())?;
    log::info!("Shape assertions passed");

    let report = GaussJordan::new(augmented.clone(), config.epsilon)?.solve();
    log::info!(
        "Gauss-Jordan finished in {} steps: {:?}",
        report.steps.len(),
        report.outcome
    );
    Ok(report)
}

pub fn simplex_solve(
    objective: ObjectiveFunction,
    constraints: Vec<Constraint>,
    config: &SolverConfig,
) -> Result<SimplexReport, InputError> {
    log::info!(
        "Received input:\nobjective: {objective}\nconstraints:\n{}",
        constraints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );

    let problem = Problem::new(objective, constraints, &config.simplex)?;
    log::info!("Problem formed: {problem}");

    let report = problem.solve(config);
    log::info!("Solution:\n{}", report.outcome.as_str());
    Ok(report)
}

pub fn transportation_solve(
    supply: &DVector<f64>,
    demand: &DVector<f64>,
    costs: &DMatrix<f64>,
    initial_plan: Option<&DMatrix<f64>>,
    config: &SolverConfig,
) -> Result<TransportReport, TransportError> {
    log::info!(
        "Received input:\n\
        supply:{supply}\n\
        demand:{demand}\n\
        costs:{costs}\n\
        initial_plan: {initial_plan:?}"
    );

    let solver = TransportationSolver::new(supply, demand, costs, initial_plan, config)?;
    log::info!("Shape assertions passed");

    let report = solver.solve();
    log::info!(
        "Transportation finished ({:?}), total cost {}",
        report.status,
        report.total_cost
    );
    Ok(report)
}
