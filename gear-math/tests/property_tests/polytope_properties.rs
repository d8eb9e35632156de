//! Property-based tests for polytope reduction
//!
//! This module tests:
//! - Reduction is idempotent
//! - Reduction preserves the feasible region
//! - Reduced rows are a subset of the input rows

use gear_math::polytope::{Polytope, PolytopeReducer};
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Random 2-D polytopes that contain the origin (every bound is non-negative)
fn polytope_strategy() -> impl Strategy<Value = Polytope> {
    prop::collection::vec(((-5i64..5i64, -5i64..5i64), 0i64..10i64), 1..7).prop_map(|rows| {
        let (a, b): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .map(|((x, y), bound)| (vec![rat(x), rat(y)], rat(bound)))
            .unzip();
        Polytope::from_rows(2, a, b).unwrap()
    })
}

proptest! {
    #[test]
    fn reduction_is_idempotent(p in polytope_strategy()) {
        let mut reducer = PolytopeReducer::default_config();
        let once = reducer.reduce(&p, None).unwrap();
        let twice = reducer.reduce(&once, None).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn reduction_preserves_region(p in polytope_strategy()) {
        let mut reducer = PolytopeReducer::default_config();
        let reduced = reducer.reduce(&p, None).unwrap();

        // Every original row is implied by the reduced system
        for (row, bound) in p.rows().iter().zip(p.bounds()) {
            prop_assert!(reducer.entails(&reduced, row, bound).unwrap());
        }
    }

    #[test]
    fn reduction_keeps_subset_of_rows(p in polytope_strategy()) {
        let mut reducer = PolytopeReducer::default_config();
        let reduced = reducer.reduce(&p, None).unwrap();

        prop_assert!(reduced.num_rows() <= p.num_rows());
        for (row, bound) in reduced.rows().iter().zip(reduced.bounds()) {
            let found = p
                .rows()
                .iter()
                .zip(p.bounds())
                .any(|(r, b)| r == row && b == bound);
            prop_assert!(found);
        }
    }
}
