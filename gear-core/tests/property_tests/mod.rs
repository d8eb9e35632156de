//! Property-based tests for gear-core
//!
//! This module contains property tests for:
//! - Term set simplification
//! - Abduction and deduction
//! - Contract composition

mod contract_properties;
mod simplify_properties;
mod transform_properties;
