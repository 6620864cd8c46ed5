use std::fmt;

use derive_more::{Display, IsVariant};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Why a tableau column exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IsVariant, Serialize, Deserialize,
)]
pub enum VariableRole {
    #[display(fmt = "x")]
    Structural,
    #[display(fmt = "s")]
    Slack,
    #[display(fmt = "e")]
    Surplus,
    #[display(fmt = "a")]
    Artificial,
}

/// A tableau column: `ordinal` counts within its role, so `x1`, `s1`, `a1` may all exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Variable {
    pub role: VariableRole,
    pub ordinal: usize,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role, self.ordinal + 1)
    }
}
