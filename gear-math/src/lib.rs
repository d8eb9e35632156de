//! Gear Math - Exact Rational Machinery for Polyhedral Contracts
//!
//! This crate provides the numeric layer underneath `gear-core`:
//! - An exact two-phase simplex solver over [`BigRational`](num_rational::BigRational)
//! - Gauss-Jordan solving of square linear systems with symbolic parameters
//! - LP-based redundancy reduction of polytopes `A·x ≤ b`
//!
//! Nothing here knows about named variables; columns are plain indices.
//!
//! # Examples
//!
//! ```
//! use gear_math::polytope::{Polytope, PolytopeReducer};
//! use num_bigint::BigInt;
//! use num_rational::BigRational;
//!
//! let rat = |n: i64| BigRational::from_integer(BigInt::from(n));
//!
//! // x <= 5 and x <= 6: the second row is redundant
//! let p = Polytope::from_rows(1, vec![vec![rat(1)], vec![rat(1)]], vec![rat(5), rat(6)]).unwrap();
//! let mut reducer = PolytopeReducer::default_config();
//! let reduced = reducer.reduce(&p, None).unwrap();
//! assert_eq!(reduced.bounds(), &[rat(5)]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod linear_system;
pub mod lp;
pub mod polytope;

pub use error::{MathError, MathResult};
pub use linear_system::{AffineExpr, LinearEquation, LinearSystemSolver, LinearSystemStats};
pub use lp::{ConstraintSense, LpConfig, LpResult, LpSolver, LpStats, OptDir, VarId};
pub use polytope::{Bound, Polytope, PolytopeReducer, ReducerConfig, ReducerStats};
