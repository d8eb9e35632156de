//! Property-based tests for term set simplification
//!
//! This module tests:
//! - Simplification is idempotent
//! - Simplification preserves the feasible region
//! - Simplified sets are subsets of their input

use gear_core::{Term, TermSet};
use proptest::prelude::*;

/// Terms over x and y with a non-negative bound, so the origin is feasible
fn term_strategy() -> impl Strategy<Value = Term> {
    (-4i64..4i64, -4i64..4i64, 0i64..8i64)
        .prop_map(|(a, b, c)| Term::from_integers([("x", a), ("y", b)], c))
}

fn term_set_strategy() -> impl Strategy<Value = TermSet> {
    prop::collection::vec(term_strategy(), 0..6).prop_map(|terms| terms.into_iter().collect())
}

proptest! {
    #[test]
    fn simplify_is_idempotent(set in term_set_strategy()) {
        let once = set.simplify(None).unwrap();
        let twice = once.simplify(None).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn simplify_with_helpers_is_idempotent(
        set in term_set_strategy(),
        helpers in term_set_strategy(),
    ) {
        let once = set.simplify(Some(&helpers)).unwrap();
        let twice = once.simplify(Some(&helpers)).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn simplify_preserves_region(set in term_set_strategy()) {
        let reduced = set.simplify(None).unwrap();
        prop_assert!(reduced.implies(&set).unwrap());
        prop_assert!(set.implies(&reduced).unwrap());
    }

    #[test]
    fn simplify_keeps_subset(set in term_set_strategy(), helpers in term_set_strategy()) {
        let reduced = set.simplify(Some(&helpers)).unwrap();
        prop_assert!(reduced.len() <= set.len());
        for term in &reduced {
            prop_assert!(set.contains(term));
        }
        // Together with the helpers nothing is lost
        prop_assert!(reduced.union(&helpers).implies(&set).unwrap());
    }
}
