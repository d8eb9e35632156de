//! Error types for term, transformation and contract operations.

use gear_math::MathError;
use thiserror::Error;

/// Error type for gear operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GearError {
    /// A constraint could not be read as a linear term, or a contract's
    /// terms mention variables it does not declare
    #[error("malformed term: {0}")]
    MalformedTerm(String),
    /// Composition attempted on contracts sharing output variables
    #[error("contracts are not composable: shared outputs {0}")]
    NotComposable(String),
    /// The elimination system is not square
    #[error("dimension mismatch: {equations} equations for {unknowns} variables to eliminate")]
    DimensionMismatch {
        /// Number of equations
        equations: usize,
        /// Number of target variables appearing in them
        unknowns: usize,
    },
    /// The elimination system has no unique solution
    #[error("elimination system is unsolvable: {0}")]
    Unsolvable(String),
    /// A constraint set has no feasible point, or the LP budget ran out
    #[error("infeasible: {0}")]
    Infeasible(String),
    /// Not enough helper terms to eliminate a term's target variables
    #[error("insufficient helpers for {term}: {helpers} helper terms for {targets} variables")]
    InsufficientHelpers {
        /// The term being transformed
        term: String,
        /// Helper terms selected
        helpers: usize,
        /// Eliminable variables those helpers mention
        targets: usize,
    },
}

/// Result type for gear operations
pub type Result<T> = std::result::Result<T, GearError>;

impl From<MathError> for GearError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::DimensionMismatch { equations, unknowns } => {
                GearError::DimensionMismatch { equations, unknowns }
            }
            MathError::Singular => GearError::Unsolvable(err.to_string()),
            MathError::ShapeMismatch { .. } => GearError::MalformedTerm(err.to_string()),
            MathError::Infeasible | MathError::IterationLimit(_) => {
                GearError::Infeasible(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_mapping() {
        assert!(matches!(
            GearError::from(MathError::Singular),
            GearError::Unsolvable(_)
        ));
        assert!(matches!(
            GearError::from(MathError::IterationLimit(10)),
            GearError::Infeasible(_)
        ));
        assert_eq!(
            GearError::from(MathError::DimensionMismatch {
                equations: 1,
                unknowns: 2
            }),
            GearError::DimensionMismatch {
                equations: 1,
                unknowns: 2
            }
        );
    }

    #[test]
    fn test_display() {
        let err = GearError::InsufficientHelpers {
            term: "1*x <= 1".to_string(),
            helpers: 1,
            targets: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient helpers for 1*x <= 1: 1 helper terms for 2 variables"
        );
    }
}
