//! Tableau-based solvers: modified Jordan exclusion, Gauss-Jordan elimination, the Big-M simplex
//! method and the transportation problem.
//!
//! Every solver works on dense `nalgebra` matrices of `f64` and records its progress as owned,
//! serializable steps. The crate logs through the `log` facade and installs no logger itself.

mod helpers;

pub mod command;
pub mod config;
pub mod error;
pub mod gauss;
pub mod jordan;
pub mod pivot;
pub mod simplex;
pub mod transport;

pub use config::{SimplexConfig, SolverConfig, TransportationConfig};
