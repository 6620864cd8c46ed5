use pretty_assertions::{assert_eq, assert_str_eq};

use super::*;

fn row(values: &[f64]) -> RowDVector<f64> {
    RowDVector::from_row_slice(values)
}

fn prepare_problem() -> Result<Problem, InputError> {
    Problem::new(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 1.]), Sign::Less, 10.),
            Constraint::new(row(&[1., 2.]), Sign::Greater, 4.),
            Constraint::new(row(&[1., -1.]), Sign::Equals, 1.),
        ],
        &SimplexConfig::default(),
    )
}

#[test]
fn columns_are_structural_slack_surplus_artificial() {
    let problem = prepare_problem().unwrap();

    assert_str_eq!(
        problem
            .variables()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        "x1 x2 s1 e1 a1 a2"
    );
    assert_eq!(problem.basis(), &[2, 4, 5]);
    assert_str_eq!(
        problem.tableau().to_string(),
        DMatrix::from_row_slice(
            3,
            7,
            &[
                1., 1., 1., 0., 0., 0., 10., //
                1., 2., 0., -1., 1., 0., 4., //
                1., -1., 0., 0., 0., 1., 1., //
            ]
        )
        .to_string()
    );
}

#[test]
fn artificial_reduced_costs_start_at_zero() {
    let problem = prepare_problem().unwrap();

    assert_eq!(
        problem.objective(),
        &RowDVector::from_row_slice(&[
            BigNumber::new(-2., -1.),
            BigNumber::new(-1., -1.),
            BigNumber::zero(),
            BigNumber::new(1., 0.),
            BigNumber::zero(),
            BigNumber::zero(),
            BigNumber::new(-5., 0.),
        ])
    );
    assert_str_eq!(
        problem
            .objective()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        "-2M-1 -M-1 0 M 0 0 -5M"
    );
}

#[test]
fn minimization_keeps_costs_positive() {
    let problem = Problem::new(
        ObjectiveFunction::new(row(&[2., 3.]), Direction::Minimize),
        vec![Constraint::new(row(&[1., 1.]), Sign::Less, 4.)],
        &SimplexConfig::default(),
    )
    .unwrap();

    assert_eq!(
        problem.objective(),
        &RowDVector::from_row_slice(&[
            BigNumber::from(2.),
            BigNumber::from(3.),
            BigNumber::zero(),
            BigNumber::zero(),
        ])
    );
}

#[test]
fn negative_rhs_is_rejected_by_default() {
    let result = Problem::new(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 0.]), Sign::Less, 3.),
            Constraint::new(row(&[-1., -1.]), Sign::Less, -2.),
        ],
        &SimplexConfig::default(),
    );

    assert_eq!(result, Err(InputError::NegativeRhs { row: 1, value: -2. }));
}

#[test]
fn negative_rhs_is_flipped_when_enabled() {
    let config = SimplexConfig {
        normalize_negative_rhs: true,
        ..Default::default()
    };
    let problem = Problem::new(
        ObjectiveFunction::new(row(&[1., 1.]), Direction::Minimize),
        vec![Constraint::new(row(&[-1., -1.]), Sign::Less, -2.)],
        &config,
    )
    .unwrap();

    assert_str_eq!(
        problem
            .variables()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        "x1 x2 e1 a1"
    );
    assert_str_eq!(
        problem.tableau().to_string(),
        DMatrix::from_row_slice(1, 5, &[1., 1., -1., 1., 2.]).to_string()
    );
}

#[test]
fn short_rows_are_padded_with_zeros() {
    let problem = Problem::new(
        ObjectiveFunction::new(row(&[1., 0., 2.]), Direction::Maximize),
        vec![
            Constraint::new(row(&[1., 1., 1.]), Sign::Less, 6.),
            Constraint::new(row(&[0., 1.]), Sign::Less, 2.),
        ],
        &SimplexConfig::default(),
    )
    .unwrap();

    assert_eq!(problem.n_structural, 3);
    assert_str_eq!(
        problem.tableau().to_string(),
        DMatrix::from_row_slice(
            2,
            6,
            &[
                1., 1., 1., 1., 0., 6., //
                0., 1., 0., 0., 1., 2., //
            ]
        )
        .to_string()
    );
}

#[test]
fn constraints_longer_than_the_objective_are_rejected() {
    let result = Problem::new(
        ObjectiveFunction::new(row(&[1.]), Direction::Maximize),
        vec![Constraint::new(row(&[1., 1.]), Sign::Less, 6.)],
        &SimplexConfig::default(),
    );

    assert_eq!(
        result,
        Err(InputError::DimensionMismatch {
            what: "constraint 0 is longer than the objective function".to_owned(),
            left: "2".to_owned(),
            right: "1".to_owned(),
        })
    );
}

#[test]
fn empty_and_non_finite_input_is_rejected() {
    assert_eq!(
        Problem::new(
            ObjectiveFunction::new(RowDVector::zeros(0), Direction::Maximize),
            vec![],
            &SimplexConfig::default(),
        ),
        Err(InputError::Empty {
            what: "objective function".to_owned()
        })
    );
    assert_eq!(
        Problem::new(
            ObjectiveFunction::new(row(&[1.]), Direction::Maximize),
            vec![Constraint::new(row(&[f64::INFINITY]), Sign::Less, 1.)],
            &SimplexConfig::default(),
        ),
        Err(InputError::NonFinite {
            what: "constraint".to_owned()
        })
    );
}

#[test]
fn display_forms() {
    assert_str_eq!(
        ObjectiveFunction::new(row(&[3., -5., 0.]), Direction::Maximize).to_string(),
        "max z = 3x1 - 5x2"
    );
    assert_str_eq!(
        Constraint::new(row(&[1., 2.]), Sign::Greater, 4.).to_string(),
        "1x1 + 2x2 >= 4"
    );
    assert_eq!(Sign::Less * -1., Sign::Greater);
    assert_eq!(Sign::Equals * -1., Sign::Equals);
}
