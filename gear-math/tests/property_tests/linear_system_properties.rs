//! Property-based tests for exact linear-system solving

use gear_math::linear_system::{LinearEquation, LinearSystemSolver};
use gear_math::MathError;
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use rustc_hash::FxHashMap;

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn nonzero_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![-9i64..-1i64, 1i64..9i64]
}

proptest! {
    /// Solving a*x + p*y = r and substituting back satisfies the equation
    #[test]
    fn solution_satisfies_equation(
        a in nonzero_strategy(),
        p in -9i64..9i64,
        r in -20i64..20i64,
        y in -20i64..20i64
    ) {
        let mut solver = LinearSystemSolver::new();
        let eq = LinearEquation::new([(0, rat(a)), (1, rat(p))], rat(r));
        let sol = solver.solve(std::slice::from_ref(&eq), &[0]).unwrap();

        let mut assignment = FxHashMap::default();
        assignment.insert(1, rat(y));
        let x = sol[&0].eval(&assignment);
        prop_assert_eq!(rat(a) * x + rat(p) * rat(y), rat(r));
    }

    /// A 2x2 system with non-zero determinant solves exactly
    #[test]
    fn two_by_two_roundtrip(
        a in -9i64..9i64, b in -9i64..9i64,
        c in -9i64..9i64, d in -9i64..9i64,
        x in -10i64..10i64, y in -10i64..10i64
    ) {
        let eqs = vec![
            LinearEquation::new([(0, rat(a)), (1, rat(b))], rat(a * x + b * y)),
            LinearEquation::new([(0, rat(c)), (1, rat(d))], rat(c * x + d * y)),
        ];
        let mut solver = LinearSystemSolver::new();
        let result = solver.solve(&eqs, &[0, 1]);

        if a * d - b * c == 0 {
            prop_assert_eq!(result, Err(MathError::Singular));
        } else {
            let sol = result.unwrap();
            prop_assert_eq!(sol[&0].constant.clone(), rat(x));
            prop_assert_eq!(sol[&1].constant.clone(), rat(y));
        }
    }
}
