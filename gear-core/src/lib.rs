//! Gear Core - Polyhedral Assume-Guarantee Contracts
//!
//! This crate provides the term layer for reasoning about linear
//! contracts:
//! - [`Var`], [`Term`] and [`TermSet`]: linear inequalities over named
//!   variables with exact rational coefficients
//! - Redundancy reduction and entailment through an exact LP solver
//! - Abduction and deduction: eliminating variables from a constraint set
//!   with the help of a context
//! - [`IoContract`]: composition and refinement of input/output contracts
//! - A small textual parser for constraints
//!
//! # Examples
//!
//! ```
//! use gear_core::{parse_terms, var_set};
//!
//! let reference = parse_terms(["x + y <= 4"]).unwrap();
//! let context = parse_terms(["y <= 10"]).unwrap();
//!
//! // Eliminate y assuming the worst case y = 10
//! let result = reference.abduce_with_context(&context, &var_set(["y"])).unwrap();
//! assert_eq!(result.to_string(), "1*x <= -6");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod contract;
pub mod error;
pub mod parser;
pub mod reduce;
pub mod solve;
pub mod term;
pub mod term_set;
pub mod transform;
pub mod variable;

pub use config::{Config, HelperPolicy, TransformConfig};
pub use contract::IoContract;
pub use error::{GearError, Result};
pub use parser::{parse_constraint, parse_term, parse_terms};
pub use reduce::PolytopePair;
pub use solve::values_of_vars_to_elim;
pub use term::Term;
pub use term_set::TermSet;
pub use transform::{TermOutcome, TransformEngine, TransformMode, TransformStats};
pub use variable::{Var, VarSet, var_set};
