//! Entry points for callers holding raw matrices: each one validates its input, runs one solver
//! and hands back the owned result.

mod compute;

pub use compute::*;
