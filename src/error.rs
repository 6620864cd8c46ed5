use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Rejection of malformed input, raised before any tableau is built.
#[derive(Debug, Clone, PartialEq, Display, Error, Serialize, Deserialize)]
pub enum InputError {
    #[display(fmt = "dimension mismatch: {} ({} vs {})", what, left, right)]
    DimensionMismatch {
        what: String,
        left: String,
        right: String,
    },
    #[display(fmt = "{} is empty", what)]
    Empty { what: String },
    #[display(fmt = "{} contains a non-finite number", what)]
    NonFinite { what: String },
    #[display(fmt = "constraint {} has a negative right-hand side {}", row, value)]
    NegativeRhs { row: usize, value: f64 },
    #[display(fmt = "{}[{}] is negative: {}", what, index, value)]
    NegativeQuantity {
        what: String,
        index: usize,
        value: f64,
    },
    #[display(fmt = "{} index {} is out of range 0..{}", what, index, len)]
    OutOfRange {
        what: String,
        index: usize,
        len: usize,
    },
}

/// The selected pivot element is too close to zero to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Display, Error, Serialize, Deserialize)]
#[display(fmt = "pivot element a[{}, {}] = {} is zero", row, column, value)]
pub struct ZeroPivotError {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

/// Rejection of a requested pivot cell: out of the matrix, or too small to divide by.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum PivotError {
    #[display(fmt = "{}", _0)]
    Input(InputError),
    #[display(fmt = "{}", _0)]
    ZeroPivot(ZeroPivotError),
}

impl From<InputError> for PivotError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<ZeroPivotError> for PivotError {
    fn from(err: ZeroPivotError) -> Self {
        Self::ZeroPivot(err)
    }
}

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum TransportError {
    #[display(fmt = "{}", _0)]
    Input(InputError),
    #[display(fmt = "initial plan is infeasible: {}", reason)]
    Infeasible { reason: String },
    #[display(fmt = "initial plan is not basic: its occupied cells contain a cycle")]
    NotBasic,
}

impl From<InputError> for TransportError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

pub(crate) fn ensure_finite<'a>(
    what: &str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), InputError> {
    if values.into_iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(InputError::NonFinite {
            what: what.to_owned(),
        })
    }
}

pub(crate) fn ensure_in_range(what: &str, index: usize, len: usize) -> Result<(), InputError> {
    if index < len {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            what: what.to_owned(),
            index,
            len,
        })
    }
}

pub(crate) fn ensure_non_negative<'a>(
    what: &str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), InputError> {
    match values.into_iter().enumerate().find(|(_, value)| **value < 0.) {
        Some((index, value)) => Err(InputError::NegativeQuantity {
            what: what.to_owned(),
            index,
            value: *value,
        }),
        None => Ok(()),
    }
}
