//! Polytope Redundancy Reduction.
//!
//! A polytope is held in matrix form `A·x ≤ b`. Reduction removes every
//! row that is implied by the remaining rows together with an optional,
//! fixed helper polytope `A_h·x ≤ b_h`.
//!
//! ## Algorithm
//!
//! For each row `i` of the working matrix:
//! 1. Relax the row's own bound to `b_i + 1`.
//! 2. Maximize `A_i·x` over the relaxed rows plus all helper rows.
//! 3. If the optimum is still `≤ b_i` the row is implied by the others
//!    and is dropped; otherwise it is kept.
//!
//! The relaxation keeps every probe bounded by `b_i + 1`. Removing a row
//! only enlarges the region the other rows describe, so a row kept once
//! stays non-redundant and a single pass reaches the fixed point.
//!
//! Before probing, `S ∪ H` is checked for feasibility. An empty region
//! is reported as [`MathError::Infeasible`] rather than being reduced.

use crate::error::{MathError, MathResult};
use crate::lp::{ConstraintSense, LpConfig, LpResult, LpSolver, OptDir};
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::{debug, trace};

/// A polytope in matrix form `A·x ≤ b`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polytope {
    dim: usize,
    rows: Vec<Vec<BigRational>>,
    bounds: Vec<BigRational>,
}

impl Polytope {
    /// Create an empty polytope over `dim` columns.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            rows: Vec::new(),
            bounds: Vec::new(),
        }
    }

    /// Build a polytope from rows and bounds.
    pub fn from_rows(
        dim: usize,
        rows: Vec<Vec<BigRational>>,
        bounds: Vec<BigRational>,
    ) -> MathResult<Self> {
        if rows.len() != bounds.len() {
            return Err(MathError::DimensionMismatch {
                equations: rows.len(),
                unknowns: bounds.len(),
            });
        }
        if let Some(row) = rows.iter().find(|r| r.len() != dim) {
            return Err(MathError::ShapeMismatch {
                expected: dim,
                found: row.len(),
            });
        }
        Ok(Self { dim, rows, bounds })
    }

    /// Append a row `row·x ≤ bound`.
    pub fn push_row(&mut self, row: Vec<BigRational>, bound: BigRational) -> MathResult<()> {
        if row.len() != self.dim {
            return Err(MathError::ShapeMismatch {
                expected: self.dim,
                found: row.len(),
            });
        }
        self.rows.push(row);
        self.bounds.push(bound);
        Ok(())
    }

    /// Number of columns.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Coefficient rows.
    pub fn rows(&self) -> &[Vec<BigRational>] {
        &self.rows
    }

    /// Right-hand sides.
    pub fn bounds(&self) -> &[BigRational] {
        &self.bounds
    }

    /// Decompose into `(A, b)`.
    pub fn into_parts(self) -> (Vec<Vec<BigRational>>, Vec<BigRational>) {
        (self.rows, self.bounds)
    }

    fn remove_row(&mut self, index: usize) {
        self.rows.remove(index);
        self.bounds.remove(index);
    }
}

/// Upper bound of a linear objective over a polytope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// Finite supremum
    Finite(BigRational),
    /// Objective is unbounded above
    Unbounded,
}

/// Configuration for polytope reduction.
#[derive(Debug, Clone)]
pub struct ReducerConfig {
    /// Slack allowed when comparing an optimum against a bound.
    pub tolerance: BigRational,
    /// Pivot budget for each LP solve.
    pub max_lp_iterations: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            tolerance: BigRational::zero(),
            max_lp_iterations: LpConfig::default().max_iterations,
        }
    }
}

/// Statistics for polytope reduction.
#[derive(Debug, Clone, Default)]
pub struct ReducerStats {
    /// LP problems solved.
    pub lp_solves: u64,
    /// Rows probed for redundancy.
    pub rows_tested: u64,
    /// Rows found redundant and removed.
    pub rows_removed: u64,
}

/// LP-based redundancy remover.
#[derive(Debug, Default)]
pub struct PolytopeReducer {
    config: ReducerConfig,
    stats: ReducerStats,
}

impl PolytopeReducer {
    /// Create a new reducer.
    pub fn new(config: ReducerConfig) -> Self {
        Self {
            config,
            stats: ReducerStats::default(),
        }
    }

    /// Create with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReducerConfig::default())
    }

    /// Get configuration.
    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Get statistics.
    pub fn stats(&self) -> &ReducerStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = ReducerStats::default();
    }

    /// Remove every row of `polytope` implied by the others and `helper`.
    pub fn reduce(
        &mut self,
        polytope: &Polytope,
        helper: Option<&Polytope>,
    ) -> MathResult<Polytope> {
        let helper = helper.filter(|h| !h.is_empty());
        if let Some(h) = helper
            && h.dim() != polytope.dim()
        {
            return Err(MathError::ShapeMismatch {
                expected: polytope.dim(),
                found: h.dim(),
            });
        }

        if polytope.is_empty() {
            return Ok(polytope.clone());
        }
        if polytope.num_rows() == 1 && helper.is_none() {
            return Ok(polytope.clone());
        }

        let mut context: Vec<&Polytope> = vec![polytope];
        context.extend(helper);
        if !self.is_feasible(&context)? {
            debug!(rows = polytope.num_rows(), "polytope is infeasible");
            return Err(MathError::Infeasible);
        }

        let mut work = polytope.clone();
        let mut i = 0;
        while i < work.num_rows() {
            self.stats.rows_tested += 1;

            let mut probe = work.clone();
            probe.bounds[i] += BigRational::one();
            let mut context: Vec<&Polytope> = vec![&probe];
            context.extend(helper);

            let optimum = self.maximize(&work.rows[i], &context)?;
            trace!(row = i, ?optimum, bound = %work.bounds[i], "redundancy probe");

            let redundant = match &optimum {
                Bound::Finite(value) => *value <= &work.bounds[i] + &self.config.tolerance,
                Bound::Unbounded => false,
            };
            if redundant {
                debug!(row = i, "removing redundant row");
                work.remove_row(i);
                self.stats.rows_removed += 1;
            } else {
                i += 1;
            }
        }

        Ok(work)
    }

    /// Check whether `premises` imply `row·x ≤ bound`.
    ///
    /// An infeasible premise set implies everything.
    pub fn entails(
        &mut self,
        premises: &Polytope,
        row: &[BigRational],
        bound: &BigRational,
    ) -> MathResult<bool> {
        match self.maximize(row, &[premises]) {
            Ok(Bound::Finite(value)) => Ok(value <= bound + &self.config.tolerance),
            Ok(Bound::Unbounded) => Ok(false),
            Err(MathError::Infeasible) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Check whether the intersection of `polytopes` is non-empty.
    pub fn is_feasible(&mut self, polytopes: &[&Polytope]) -> MathResult<bool> {
        let dim = polytopes.first().map_or(0, |p| p.dim());
        match self.maximize(&vec![BigRational::zero(); dim], polytopes) {
            Ok(_) => Ok(true),
            Err(MathError::Infeasible) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Maximize `objective·x` over the intersection of `polytopes`.
    pub fn maximize(
        &mut self,
        objective: &[BigRational],
        polytopes: &[&Polytope],
    ) -> MathResult<Bound> {
        let dim = objective.len();
        if let Some(p) = polytopes.iter().find(|p| p.dim() != dim) {
            return Err(MathError::ShapeMismatch {
                expected: dim,
                found: p.dim(),
            });
        }

        let mut lp = LpSolver::with_config(LpConfig {
            max_iterations: self.config.max_lp_iterations,
        });
        let vars: Vec<_> = (0..dim).map(|_| lp.new_free()).collect();
        for (var, c) in vars.iter().zip(objective) {
            lp.set_objective(*var, c.clone());
        }
        lp.set_direction(OptDir::Maximize);

        for polytope in polytopes {
            for (row, bound) in polytope.rows.iter().zip(&polytope.bounds) {
                let coeffs = vars
                    .iter()
                    .zip(row)
                    .filter(|(_, c)| !c.is_zero())
                    .map(|(v, c)| (*v, c.clone()));
                lp.new_constraint(coeffs, ConstraintSense::Le, bound.clone());
            }
        }

        self.stats.lp_solves += 1;
        match lp.solve() {
            LpResult::Optimal { objective, .. } => Ok(Bound::Finite(objective)),
            LpResult::Unbounded => Ok(Bound::Unbounded),
            LpResult::Infeasible => Err(MathError::Infeasible),
            LpResult::Unknown => Err(MathError::IterationLimit(self.config.max_lp_iterations)),
        }
    }
}
