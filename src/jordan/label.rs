use std::{fmt, ops::Neg};

use derive_more::{Display, IsVariant};
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IsVariant, Serialize, Deserialize,
)]
pub enum Role {
    /// Independent variable, heads a column initially.
    #[display(fmt = "X")]
    Input,
    /// Dependent variable, heads a row initially.
    #[display(fmt = "Y")]
    Output,
}

/// Symbolic name of a Jordan table row or column: `X3`, `-Y1`, ...
///
/// `index` is zero-based and displayed one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Label {
    pub role: Role,
    pub index: usize,
    pub negated: bool,
}

impl Label {
    pub fn input(index: usize) -> Self {
        Self::new(Role::Input, index, false)
    }

    pub fn output(index: usize) -> Self {
        Self::new(Role::Output, index, false)
    }

    /// Name without the sign.
    pub fn base_name(&self) -> String {
        format!("{}{}", self.role, self.index + 1)
    }
}

impl Neg for Label {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            negated: !self.negated,
            ..self
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            if self.negated { "-" } else { "" },
            self.base_name()
        )
    }
}
