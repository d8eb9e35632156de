//! Property-based tests for abduction and deduction
//!
//! This module tests:
//! - Abduced sets together with the context imply the reference
//! - The reference together with the context implies deduced sets
//! - Deduction removes every eliminated variable

use gear_core::{Term, TermSet, var_set};
use proptest::prelude::*;

/// Reference terms over x and y
fn reference_strategy() -> impl Strategy<Value = TermSet> {
    prop::collection::vec((-3i64..3i64, -3i64..3i64, 0i64..6i64), 1..4).prop_map(|rows| {
        rows.into_iter()
            .map(|(a, b, c)| Term::from_integers([("x", a), ("y", b)], c))
            .collect()
    })
}

/// Context terms mentioning y, and possibly z
fn context_strategy() -> impl Strategy<Value = TermSet> {
    let nonzero = prop_oneof![-3i64..-1i64, 1i64..3i64];
    prop::collection::vec((nonzero, -3i64..3i64, 0i64..6i64), 0..3).prop_map(|rows| {
        rows.into_iter()
            .map(|(p, q, d)| Term::from_integers([("y", p), ("z", q)], d))
            .collect()
    })
}

proptest! {
    #[test]
    fn abduction_is_sufficient(
        reference in reference_strategy(),
        context in context_strategy()
    ) {
        let result = reference.abduce_with_context(&context, &var_set(["y"])).unwrap();
        prop_assert!(result.union(&context).implies(&reference).unwrap());
    }

    #[test]
    fn deduction_is_implied(
        reference in reference_strategy(),
        context in context_strategy()
    ) {
        let result = reference.deduce_with_context(&context, &var_set(["y"])).unwrap();
        prop_assert!(reference.union(&context).implies(&result).unwrap());
    }

    #[test]
    fn deduction_removes_eliminated_vars(
        reference in reference_strategy(),
        context in context_strategy()
    ) {
        let vars = var_set(["y"]);
        let result = reference.deduce_with_context(&context, &vars).unwrap();
        prop_assert!(result.vars().is_disjoint(&vars));
    }
}
