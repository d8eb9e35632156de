//! Exact Solving of Square Linear Systems.
#![allow(clippy::needless_range_loop)] // Elimination uses explicit indexing
//!
//! Solves `Σ a_ij·x_j + Σ p_ik·y_k = r_i` for the target unknowns `x`,
//! leaving every other variable `y` as a symbolic parameter. Each target
//! comes back as an affine expression over the parameters.
//!
//! ## Algorithm
//!
//! Gauss-Jordan elimination on the target columns of the augmented
//! matrix `[A | P | r]`. The parameter block is carried along so that
//! after reduction row `i` reads `x_i + Σ p'_ik·y_k = r'_i`, i.e.
//! `x_i = r'_i - Σ p'_ik·y_k`.
//!
//! A column with no non-zero pivot means the system has either no
//! solution or infinitely many; both are reported as
//! [`MathError::Singular`].

use crate::error::{MathError, MathResult};
use crate::lp::VarId;
use num_rational::BigRational;
use num_traits::Zero;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// A linear equation: `Σ coeffs[v]·v = rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearEquation {
    /// Coefficients (var_id -> coefficient).
    pub coeffs: FxHashMap<VarId, BigRational>,
    /// Right-hand side.
    pub rhs: BigRational,
}

impl LinearEquation {
    /// Create a new equation.
    pub fn new(
        coeffs: impl IntoIterator<Item = (VarId, BigRational)>,
        rhs: BigRational,
    ) -> Self {
        let mut map: FxHashMap<VarId, BigRational> = FxHashMap::default();
        for (var, c) in coeffs {
            *map.entry(var).or_insert_with(BigRational::zero) += c;
        }
        map.retain(|_, c| !c.is_zero());
        Self { coeffs: map, rhs }
    }
}

/// An affine expression `Σ coeffs[v]·v + constant`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AffineExpr {
    /// Coefficients of the parameter variables.
    pub coeffs: FxHashMap<VarId, BigRational>,
    /// Constant offset.
    pub constant: BigRational,
}

impl AffineExpr {
    /// Evaluate under an assignment; missing variables count as zero.
    pub fn eval(&self, assignment: &FxHashMap<VarId, BigRational>) -> BigRational {
        let mut value = self.constant.clone();
        for (var, c) in &self.coeffs {
            if let Some(v) = assignment.get(var) {
                value += c * v;
            }
        }
        value
    }
}

/// Statistics for the linear-system solver.
#[derive(Debug, Clone, Default)]
pub struct LinearSystemStats {
    /// Systems solved successfully.
    pub systems_solved: u64,
    /// Singular systems encountered.
    pub singular: u64,
    /// Row operations performed.
    pub row_operations: u64,
}

/// Exact Gauss-Jordan solver.
#[derive(Debug, Default)]
pub struct LinearSystemSolver {
    stats: LinearSystemStats,
}

impl LinearSystemSolver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get statistics.
    pub fn stats(&self) -> &LinearSystemStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = LinearSystemStats::default();
    }

    /// Solve a square system for `targets`.
    ///
    /// Every variable that appears in `equations` but not in `targets` is
    /// treated as a parameter of the returned expressions.
    pub fn solve(
        &mut self,
        equations: &[LinearEquation],
        targets: &[VarId],
    ) -> MathResult<FxHashMap<VarId, AffineExpr>> {
        let n = targets.len();
        if equations.len() != n {
            return Err(MathError::DimensionMismatch {
                equations: equations.len(),
                unknowns: n,
            });
        }

        let target_set: FxHashSet<VarId> = targets.iter().copied().collect();
        if target_set.len() != n {
            return Err(MathError::Singular);
        }

        let mut params: Vec<VarId> = equations
            .iter()
            .flat_map(|eq| eq.coeffs.keys().copied())
            .filter(|v| !target_set.contains(v))
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();
        params.sort_unstable();

        let width = n + params.len() + 1;
        let mut matrix: Vec<Vec<BigRational>> = equations
            .iter()
            .map(|eq| {
                let mut row = vec![BigRational::zero(); width];
                for (j, t) in targets.iter().enumerate() {
                    if let Some(c) = eq.coeffs.get(t) {
                        row[j] = c.clone();
                    }
                }
                for (k, p) in params.iter().enumerate() {
                    if let Some(c) = eq.coeffs.get(p) {
                        row[n + k] = c.clone();
                    }
                }
                row[width - 1] = eq.rhs.clone();
                row
            })
            .collect();

        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| !matrix[r][col].is_zero()) else {
                self.stats.singular += 1;
                trace!(column = col, "no pivot, system is singular");
                return Err(MathError::Singular);
            };
            matrix.swap(col, pivot_row);

            let pivot = matrix[col][col].clone();
            for elem in &mut matrix[col] {
                *elem = &*elem / &pivot;
            }

            let pivot_vec = matrix[col].clone();
            for r in 0..n {
                if r == col || matrix[r][col].is_zero() {
                    continue;
                }
                let factor = matrix[r][col].clone();
                for (elem, p) in matrix[r].iter_mut().zip(&pivot_vec) {
                    if !p.is_zero() {
                        *elem = &*elem - &factor * p;
                    }
                }
                self.stats.row_operations += 1;
            }
        }

        let solution = targets
            .iter()
            .enumerate()
            .map(|(i, &target)| {
                let row = &matrix[i];
                let coeffs = params
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| !row[n + k].is_zero())
                    .map(|(k, &p)| (p, -row[n + k].clone()))
                    .collect();
                let expr = AffineExpr {
                    coeffs,
                    constant: row[width - 1].clone(),
                };
                (target, expr)
            })
            .collect();

        self.stats.systems_solved += 1;
        Ok(solution)
    }
}
