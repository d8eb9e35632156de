//! Errors raised by the numeric layer.

use thiserror::Error;

/// Error type for exact linear algebra and LP operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A square system was expected but the shapes disagree
    #[error("dimension mismatch: {equations} equations for {unknowns} unknowns")]
    DimensionMismatch {
        /// Number of equations supplied
        equations: usize,
        /// Number of unknowns to solve for
        unknowns: usize,
    },
    /// The system has no solution or infinitely many
    #[error("linear system is singular")]
    Singular,
    /// Matrix rows or helper columns disagree in width
    #[error("shape mismatch: expected {expected} columns, found {found}")]
    ShapeMismatch {
        /// Expected column count
        expected: usize,
        /// Column count actually found
        found: usize,
    },
    /// The constraint system has no feasible point
    #[error("constraint system is infeasible")]
    Infeasible,
    /// The simplex pivot budget was exhausted
    #[error("LP iteration limit of {0} pivots reached")]
    IterationLimit(usize),
}

/// Result type for numeric operations
pub type MathResult<T> = Result<T, MathError>;
