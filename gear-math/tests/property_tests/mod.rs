//! Property-based tests for gear-math
//!
//! This module contains property tests for:
//! - Simplex LP solver correctness
//! - Exact linear-system solving
//! - Polytope redundancy reduction

mod linear_system_properties;
mod polytope_properties;
mod simplex_properties;
