//! Linear Programming over exact rationals.

pub mod simplex;

pub use simplex::{ConstraintSense, LpConfig, LpResult, LpSolver, LpStats, OptDir};

/// Variable identifier (shared across LP modules)
pub type VarId = usize;
