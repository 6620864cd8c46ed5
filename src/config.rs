use derive_new::new;
use serde::{Deserialize, Serialize};

/// Numeric and iteration settings shared by one solve.
///
/// Every comparison against zero inside a solve uses the same `epsilon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
#[serde(default)]
pub struct SolverConfig {
    pub epsilon: f64,
    pub simplex: SimplexConfig,
    pub transportation: TransportationConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            simplex: SimplexConfig::default(),
            transportation: TransportationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
#[serde(default)]
pub struct SimplexConfig {
    pub max_iterations: usize,
    /// Objective-row entries above `-optimality_threshold` count as non-negative.
    pub optimality_threshold: f64,
    /// Numeric value substituted for `M` when a step is flattened for display.
    pub big_m: f64,
    /// Multiply constraints with a negative right-hand side by -1 instead of rejecting them.
    pub normalize_negative_rhs: bool,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            optimality_threshold: 1e-9,
            big_m: 1e4,
            normalize_negative_rhs: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
#[serde(default)]
pub struct TransportationConfig {
    pub max_iterations: usize,
    /// A non-basic cell enters only when its reduced cost exceeds this.
    pub improvement_threshold: f64,
}

impl Default for TransportationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            improvement_threshold: 1e-9,
        }
    }
}
