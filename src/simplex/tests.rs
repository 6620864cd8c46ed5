use nalgebra::{DMatrix, DVector, RowDVector};
use pretty_assertions::{assert_eq, assert_str_eq};

use crate::config::{SimplexConfig, SolverConfig};

use super::*;

const TOLERANCE: f64 = 1e-7;

fn row(values: &[f64]) -> RowDVector<f64> {
    RowDVector::from_row_slice(values)
}

fn solve(
    objective: ObjectiveFunction,
    constraints: Vec<Constraint>,
    config: &SolverConfig,
) -> SimplexReport {
    Problem::new(objective, constraints, &config.simplex)
        .unwrap()
        .solve(config)
}

fn assert_optimal(outcome: &SimplexOutcome, expected_variables: &[f64], expected_value: f64) {
    let SimplexOutcome::Optimal { variables, objective_value } = outcome else {
        panic!("expected an optimal outcome, got {outcome:?}");
    };
    assert_eq!(variables.len(), expected_variables.len());
    for (actual, expected) in variables.iter().zip(expected_variables) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "variables {variables} differ from {expected_variables:?}"
        );
    }
    assert!(
        (objective_value - expected_value).abs() < TOLERANCE,
        "objective value {objective_value} differs from {expected_value}"
    );
}

fn production_problem() -> (ObjectiveFunction, Vec<Constraint>) {
    (
        ObjectiveFunction::new(row(&[3., 5.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 0.]), Sign::Less, 4.),
            Constraint::new(row(&[0., 2.]), Sign::Less, 12.),
            Constraint::new(row(&[3., 2.]), Sign::Less, 18.),
        ],
    )
}

#[test]
fn maximization_with_slack_only() {
    let (objective, constraints) = production_problem();
    let report = solve(objective, constraints, &SolverConfig::default());

    assert_optimal(&report.outcome, &[2., 6.], 36.);
    assert_eq!(report.steps.len(), 4);
    assert_eq!(report.steps[1].pivot, Some((1, 1)));
    assert_eq!(report.steps[2].pivot, Some((2, 0)));
    assert_str_eq!(
        report.steps[1].description,
        "Iteration 1: pivot at row 2, column 2; x2 enters, s2 leaves"
    );
    assert_str_eq!(
        report.steps[2].description,
        "Iteration 2: pivot at row 3, column 1; x1 enters, s3 leaves"
    );
    assert_eq!(report.steps[3].pivot, None);
    assert_str_eq!(
        report
            .steps
            .last()
            .unwrap()
            .basis
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        "s1 x2 x1"
    );
}

#[test]
fn two_bounds_meet_at_a_vertex() {
    let report = solve(
        ObjectiveFunction::new(row(&[3., 5.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 0.]), Sign::Less, 4.),
            Constraint::new(row(&[0., 2.]), Sign::Less, 12.),
        ],
        &SolverConfig::default(),
    );

    assert_optimal(&report.outcome, &[4., 6.], 42.);
}

#[test]
fn minimization_with_surplus_rows() {
    let report = solve(
        ObjectiveFunction::new(row(&[2., 3.]), Direction::Minimize),
        vec![
            Constraint::new(row(&[1., 2.]), Sign::Greater, 4.),
            Constraint::new(row(&[2., 1.]), Sign::Greater, 4.),
        ],
        &SolverConfig::default(),
    );

    assert_optimal(&report.outcome, &[4. / 3., 4. / 3.], 20. / 3.);
}

#[test]
fn minimum_on_an_axis() {
    let report = solve(
        ObjectiveFunction::new(row(&[4., 3.]), Direction::Minimize),
        vec![
            Constraint::new(row(&[1., 1.]), Sign::Greater, 10.),
            Constraint::new(row(&[1., 0.]), Sign::Less, 20.),
        ],
        &SolverConfig::default(),
    );

    assert_optimal(&report.outcome, &[0., 10.], 30.);
}

#[test]
fn equality_constraints() {
    let report = solve(
        ObjectiveFunction::new(row(&[2., 3.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 1.]), Sign::Equals, 4.),
            Constraint::new(row(&[1., -1.]), Sign::Equals, 0.),
        ],
        &SolverConfig::default(),
    );

    assert_optimal(&report.outcome, &[2., 2.], 10.);
    assert!(report
        .steps
        .last()
        .unwrap()
        .basis
        .iter()
        .all(|variable| !variable.role.is_artificial()));
}

#[test]
fn short_constraint_rows_take_part_in_the_solve() {
    let report = solve(
        ObjectiveFunction::new(row(&[1., 0., 2.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 1., 1.]), Sign::Less, 6.),
            Constraint::new(row(&[0., 1.]), Sign::Less, 2.),
        ],
        &SolverConfig::default(),
    );

    assert_optimal(&report.outcome, &[0., 0., 6.], 12.);
}

#[test]
fn zero_minimum_is_reported_without_sign() {
    let report = solve(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Minimize),
        vec![],
        &SolverConfig::default(),
    );

    assert_optimal(&report.outcome, &[0., 0.], 0.);
    let SimplexOutcome::Optimal { objective_value, .. } = report.outcome else {
        unreachable!()
    };
    assert!(objective_value.is_sign_positive());
    assert_str_eq!(format!("{objective_value}"), "0");
}

#[test]
fn contradicting_constraints_are_infeasible() {
    let report = solve(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 1.]), Sign::Greater, 10.),
            Constraint::new(row(&[1., 0.]), Sign::Less, 1.),
            Constraint::new(row(&[0., 1.]), Sign::Less, 1.),
        ],
        &SolverConfig::default(),
    );

    assert_eq!(report.outcome, SimplexOutcome::Infeasible);
    assert!(report.steps.last().unwrap().description.contains("no feasible solution"));
}

#[test]
fn unbounded_objective() {
    let report = solve(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Maximize),
        vec![Constraint::new(row(&[1., -1.]), Sign::Less, 1.)],
        &SolverConfig::default(),
    );

    assert!(report.outcome.is_unbounded());
    // initial table, the x1 pivot and the final table
    assert_eq!(report.steps.len(), 3);
    assert_str_eq!(
        report.steps[2].description,
        "Objective is unbounded: column x2 has no positive entry"
    );
}

#[test]
fn iteration_cap_is_checked_after_optimality() {
    let (objective, constraints) = production_problem();
    let config = SolverConfig {
        simplex: SimplexConfig {
            max_iterations: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    let report = solve(objective.clone(), constraints.clone(), &config);
    assert_eq!(report.outcome, SimplexOutcome::MaxIterationsExceeded);
    assert_eq!(report.steps.len(), 3);

    let config = SolverConfig {
        simplex: SimplexConfig {
            max_iterations: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    let report = solve(objective, constraints, &config);
    assert_optimal(&report.outcome, &[2., 6.], 36.);
}

#[test]
fn flatten_puts_objective_on_top() {
    let report = solve(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Maximize),
        vec![Constraint::new(row(&[1., 1.]), Sign::Greater, 2.)],
        &SolverConfig::default(),
    );
    let initial = &report.steps[0];

    assert_str_eq!(
        initial.flatten(100.).to_string(),
        DMatrix::from_row_slice(
            2,
            5,
            &[
                -101., -101., 100., 0., -200., //
                1., 1., -1., 1., 2., //
            ]
        )
        .to_string()
    );
}

#[test]
fn outcome_messages() {
    let optimal = SimplexOutcome::Optimal {
        variables: DVector::from_row_slice(&[1., 2.5]),
        objective_value: 7.,
    };
    assert_str_eq!(optimal.as_str(), "Variables: 1, 2.5\nObjective value: 7");
    assert_str_eq!(
        SimplexOutcome::Unbounded.as_str(),
        "The objective is unbounded"
    );
}
