//! Property-based tests for contract composition
//!
//! This module tests:
//! - Composability is symmetric
//! - Composition does not depend on operand order

use gear_core::{IoContract, Term, TermSet, var_set};
use proptest::prelude::*;

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

fn outputs_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len())
}

/// `output - k*input <= g` and `k*input - output <= g`, assuming `input <= bound`
fn stage(input: &str, output: &str, k: i64, g: i64, bound: i64) -> IoContract {
    let guarantees: TermSet = [
        Term::from_integers([(output, 1), (input, -k)], g),
        Term::from_integers([(output, -1), (input, k)], g),
    ]
    .into_iter()
    .collect();
    IoContract::new(
        [Term::from_integers([(input, 1)], bound)].into_iter().collect(),
        guarantees,
        var_set([input]),
        var_set([output]),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn composability_is_symmetric(left in outputs_strategy(), right in outputs_strategy()) {
        let a = IoContract::new(TermSet::new(), TermSet::new(), var_set(["in"]), var_set(left))
            .unwrap();
        let b = IoContract::new(TermSet::new(), TermSet::new(), var_set(["in"]), var_set(right))
            .unwrap();
        prop_assert_eq!(a.composable(&b), b.composable(&a));
    }

    #[test]
    fn composition_commutes(
        k1 in -3i64..3i64, g1 in 0i64..4i64, b1 in 0i64..4i64,
        k2 in -3i64..3i64, g2 in 0i64..4i64, b2 in 0i64..4i64
    ) {
        let first = stage("i", "o", k1, g1, b1);
        let second = stage("o", "p", k2, g2, b2);
        prop_assert_eq!(first.compose(&second), second.compose(&first));
    }
}
