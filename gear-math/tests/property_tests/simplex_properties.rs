//! Property-based tests for the simplex solver
//!
//! This module tests:
//! - Exact optima on boxes
//! - Feasibility of returned points
//! - Min/max duality of the objective

use gear_math::lp::{ConstraintSense, LpResult, LpSolver, OptDir};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;

/// Strategy for generating small LP coefficients
fn lp_coeff_strategy() -> impl Strategy<Value = i64> {
    -10i64..10i64
}

/// Strategy for generating positive coefficients
fn positive_coeff_strategy() -> impl Strategy<Value = i64> {
    1i64..10i64
}

/// Helper to create rational
fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

proptest! {
    /// maximize c*x over lo <= x <= hi is attained at the matching end
    #[test]
    fn simplex_box_optimum(
        c in lp_coeff_strategy(),
        lo in -10i64..0i64,
        width in positive_coeff_strategy()
    ) {
        let hi = lo + width;
        let mut lp = LpSolver::new();
        let x = lp.new_free();
        lp.set_objective(x, rat(c));
        lp.new_constraint([(x, rat(1))], ConstraintSense::Le, rat(hi));
        lp.new_constraint([(x, rat(1))], ConstraintSense::Ge, rat(lo));

        match lp.solve() {
            LpResult::Optimal { objective, .. } => {
                let expected = if c >= 0 { c * hi } else { c * lo };
                prop_assert_eq!(objective, rat(expected));
            }
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    /// Optimal points satisfy every constraint
    #[test]
    fn simplex_solution_satisfies_constraints(
        c1 in lp_coeff_strategy(),
        c2 in lp_coeff_strategy(),
        b in positive_coeff_strategy()
    ) {
        // maximize c1*x1 + c2*x2 subject to x1 + x2 <= b, x1 >= 0, x2 >= 0
        let mut lp = LpSolver::new();
        let x1 = lp.new_continuous();
        let x2 = lp.new_continuous();
        lp.set_objective(x1, rat(c1));
        lp.set_objective(x2, rat(c2));
        lp.new_constraint([(x1, rat(1)), (x2, rat(1))], ConstraintSense::Le, rat(b));

        if let LpResult::Optimal { values, objective } = lp.solve() {
            let v1 = values[&x1].clone();
            let v2 = values[&x2].clone();
            prop_assert!(v1 >= BigRational::zero());
            prop_assert!(v2 >= BigRational::zero());
            prop_assert!(&v1 + &v2 <= rat(b));
            prop_assert_eq!(objective, rat(c1) * v1 + rat(c2) * v2);
        } else {
            prop_assert!(false, "bounded LP must have an optimum");
        }
    }

    /// min c*x == -max -c*x
    #[test]
    fn simplex_min_equals_max_negative(
        c in lp_coeff_strategy(),
        bound in positive_coeff_strategy()
    ) {
        let mut lp_min = LpSolver::new();
        let x1 = lp_min.new_continuous();
        lp_min.set_objective(x1, rat(c));
        lp_min.set_direction(OptDir::Minimize);
        lp_min.new_constraint([(x1, rat(1))], ConstraintSense::Le, rat(bound));

        let mut lp_max = LpSolver::new();
        let x2 = lp_max.new_continuous();
        lp_max.set_objective(x2, rat(-c));
        lp_max.set_direction(OptDir::Maximize);
        lp_max.new_constraint([(x2, rat(1))], ConstraintSense::Le, rat(bound));

        match (lp_min.solve(), lp_max.solve()) {
            (
                LpResult::Optimal { objective: val_min, .. },
                LpResult::Optimal { objective: val_max, .. },
            ) => prop_assert!((val_min + val_max).is_zero()),
            other => prop_assert!(false, "unexpected results {:?}", other),
        }
    }

    /// x >= a and x <= b is infeasible exactly when a > b
    #[test]
    fn simplex_detects_infeasibility(a in lp_coeff_strategy(), b in lp_coeff_strategy()) {
        let mut lp = LpSolver::new();
        let x = lp.new_free();
        lp.new_constraint([(x, rat(1))], ConstraintSense::Ge, rat(a));
        lp.new_constraint([(x, rat(1))], ConstraintSense::Le, rat(b));

        let infeasible = lp.solve() == LpResult::Infeasible;
        prop_assert_eq!(infeasible, a > b);
    }

    /// Increasing the RHS never decreases the maximum
    #[test]
    fn simplex_rhs_sensitivity(
        c in positive_coeff_strategy(),
        b1 in 1i64..5i64,
        delta in 1i64..5i64
    ) {
        let solve = |b: i64| {
            let mut lp = LpSolver::new();
            let x = lp.new_free();
            lp.set_objective(x, rat(c));
            lp.new_constraint([(x, rat(1))], ConstraintSense::Le, rat(b));
            lp.solve()
        };

        if let (LpResult::Optimal { objective: val1, .. }, LpResult::Optimal { objective: val2, .. }) =
            (solve(b1), solve(b1 + delta))
        {
            prop_assert!(val2 > val1);
        }
    }
}
