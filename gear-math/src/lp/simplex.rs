//! Two-Phase Primal Simplex over Exact Rationals.
#![allow(clippy::needless_range_loop)] // Tableau code uses explicit indexing
//!
//! Solves `max/min c·x` subject to a list of `≤`, `≥` and `=` rows.
//! Variables are either free or non-negative; free variables are split
//! into a positive and a negative column internally.
//!
//! ## Algorithm
//!
//! 1. Normalize every row to a non-negative right-hand side, adding a
//!    slack (or surplus) column per inequality.
//! 2. Rows without a usable slack get an artificial column.
//! 3. Phase I maximizes `-Σ artificials`; a negative optimum means the
//!    system is infeasible.
//! 4. Phase II optimizes the user objective over the feasible basis.
//!
//! Pivoting follows Bland's rule (smallest eligible index for both the
//! entering and leaving column), so the method terminates without
//! anti-cycling bookkeeping.
//!
//! ## References
//!
//! - Chvátal: "Linear Programming" (1983), chapters 2-3
//! - Bland: "New finite pivoting rules for the simplex method" (1977)

use super::VarId;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptDir {
    /// Maximize the objective
    #[default]
    Maximize,
    /// Minimize the objective
    Minimize,
}

/// Sense of a linear constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// `Σ a·x ≤ b`
    Le,
    /// `Σ a·x ≥ b`
    Ge,
    /// `Σ a·x = b`
    Eq,
}

/// Result of an LP solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LpResult {
    /// Optimal solution found
    Optimal {
        /// Objective value at the optimum
        objective: BigRational,
        /// Value of every declared variable
        values: FxHashMap<VarId, BigRational>,
    },
    /// No point satisfies the constraints
    Infeasible,
    /// The objective grows without bound
    Unbounded,
    /// Iteration limit reached
    Unknown,
}

/// Configuration for the simplex solver.
#[derive(Debug, Clone)]
pub struct LpConfig {
    /// Maximum number of pivots across both phases.
    pub max_iterations: usize,
}

impl Default for LpConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
        }
    }
}

/// Simplex statistics.
#[derive(Debug, Clone, Default)]
pub struct LpStats {
    /// Number of calls to `solve`
    pub solves: u64,
    /// Solves that needed a phase I
    pub phase_one: u64,
    /// Number of pivot operations
    pub pivots: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Free,
    NonNegative,
}

#[derive(Debug, Clone)]
struct Row {
    coeffs: Vec<(VarId, BigRational)>,
    sense: ConstraintSense,
    rhs: BigRational,
}

/// Outcome of one simplex phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Optimal,
    Unbounded,
    Exhausted,
}

/// Dense tableau in canonical form: each row holds the constraint
/// coefficients followed by the right-hand side.
struct Tableau {
    rows: Vec<Vec<BigRational>>,
    basis: Vec<usize>,
    num_cols: usize,
}

impl Tableau {
    fn rhs(&self, row: usize) -> &BigRational {
        &self.rows[row][self.num_cols]
    }

    fn reduced_cost(&self, cost: &[BigRational], col: usize) -> BigRational {
        let mut d = cost[col].clone();
        for (i, row) in self.rows.iter().enumerate() {
            let cb = &cost[self.basis[i]];
            if !cb.is_zero() && !row[col].is_zero() {
                d -= cb * &row[col];
            }
        }
        d
    }

    fn objective_value(&self, cost: &[BigRational]) -> BigRational {
        let mut value = BigRational::zero();
        for i in 0..self.rows.len() {
            let cb = &cost[self.basis[i]];
            if !cb.is_zero() {
                value += cb * self.rhs(i);
            }
        }
        value
    }

    fn column_value(&self, col: usize) -> BigRational {
        self.basis
            .iter()
            .position(|&b| b == col)
            .map(|i| self.rhs(i).clone())
            .unwrap_or_else(BigRational::zero)
    }

    fn pivot(&mut self, leaving_row: usize, entering_col: usize) {
        let pivot_element = self.rows[leaving_row][entering_col].clone();

        // Normalize pivot row
        for elem in &mut self.rows[leaving_row] {
            *elem = &*elem / &pivot_element;
        }

        // Eliminate other rows
        let pivot_row = self.rows[leaving_row].clone();
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == leaving_row {
                continue;
            }
            let multiplier = row[entering_col].clone();
            if multiplier.is_zero() {
                continue;
            }
            for (elem, p) in row.iter_mut().zip(&pivot_row) {
                if !p.is_zero() {
                    *elem = &*elem - &multiplier * p;
                }
            }
        }

        self.basis[leaving_row] = entering_col;
    }

    /// Maximize `cost·x` restricted to the `allowed` columns.
    fn maximize(
        &mut self,
        cost: &[BigRational],
        allowed: &[bool],
        budget: &mut usize,
        pivots: &mut u64,
    ) -> Phase {
        loop {
            // Entering column: smallest index with positive reduced cost
            let entering = (0..self.num_cols).find(|&j| {
                allowed[j] && !self.basis.contains(&j) && self.reduced_cost(cost, j).is_positive()
            });
            let Some(col) = entering else {
                return Phase::Optimal;
            };

            if *budget == 0 {
                return Phase::Exhausted;
            }
            *budget -= 1;

            // Ratio test, ties broken by smallest basic index
            let mut leaving: Option<(usize, BigRational)> = None;
            for (i, row) in self.rows.iter().enumerate() {
                let a = &row[col];
                if !a.is_positive() {
                    continue;
                }
                let ratio = &row[self.num_cols] / a;
                let better = match &leaving {
                    None => true,
                    Some((best_row, best)) => {
                        ratio < *best || (ratio == *best && self.basis[i] < self.basis[*best_row])
                    }
                };
                if better {
                    leaving = Some((i, ratio));
                }
            }

            let Some((row, _)) = leaving else {
                return Phase::Unbounded;
            };
            self.pivot(row, col);
            *pivots += 1;
        }
    }
}

/// Exact simplex solver.
#[derive(Debug, Clone, Default)]
pub struct LpSolver {
    config: LpConfig,
    domains: Vec<Domain>,
    objective: FxHashMap<VarId, BigRational>,
    direction: OptDir,
    rows: Vec<Row>,
    stats: LpStats,
}

impl LpSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::with_config(LpConfig::default())
    }

    /// Create a solver with the given configuration.
    pub fn with_config(config: LpConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Declare a non-negative variable.
    pub fn new_continuous(&mut self) -> VarId {
        self.domains.push(Domain::NonNegative);
        self.domains.len() - 1
    }

    /// Declare a variable with no bounds.
    pub fn new_free(&mut self) -> VarId {
        self.domains.push(Domain::Free);
        self.domains.len() - 1
    }

    /// Number of declared variables.
    pub fn num_vars(&self) -> usize {
        self.domains.len()
    }

    /// Number of constraint rows.
    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    /// Set the objective coefficient of a variable.
    pub fn set_objective(&mut self, var: VarId, coeff: BigRational) {
        if coeff.is_zero() {
            self.objective.remove(&var);
        } else {
            self.objective.insert(var, coeff);
        }
    }

    /// Set the optimization direction.
    pub fn set_direction(&mut self, direction: OptDir) {
        self.direction = direction;
    }

    /// Add a constraint row. Repeated variables are summed.
    pub fn new_constraint(
        &mut self,
        coeffs: impl IntoIterator<Item = (VarId, BigRational)>,
        sense: ConstraintSense,
        rhs: BigRational,
    ) {
        self.rows.push(Row {
            coeffs: coeffs.into_iter().collect(),
            sense,
            rhs,
        });
    }

    /// Get statistics.
    pub fn stats(&self) -> &LpStats {
        &self.stats
    }

    /// Solve the program.
    pub fn solve(&mut self) -> LpResult {
        self.stats.solves += 1;

        // Column layout: structural columns, then slacks, then artificials
        let mut num_cols = 0;
        let mut columns: Vec<(usize, Option<usize>)> = Vec::with_capacity(self.domains.len());
        for domain in &self.domains {
            let pos = num_cols;
            num_cols += 1;
            let neg = match domain {
                Domain::Free => {
                    num_cols += 1;
                    Some(pos + 1)
                }
                Domain::NonNegative => None,
            };
            columns.push((pos, neg));
        }

        let mut slack_of = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            if row.sense == ConstraintSense::Eq {
                slack_of.push(None);
            } else {
                slack_of.push(Some(num_cols));
                num_cols += 1;
            }
        }
        let first_artificial = num_cols;

        let mut dense = Vec::with_capacity(self.rows.len());
        let mut basis = Vec::with_capacity(self.rows.len());
        let mut artificial_rows = Vec::new();

        for (i, row) in self.rows.iter().enumerate() {
            let mut coeffs = vec![BigRational::zero(); first_artificial];
            for (var, c) in &row.coeffs {
                let (pos, neg) = columns[*var];
                coeffs[pos] += c;
                if let Some(neg) = neg {
                    coeffs[neg] -= c;
                }
            }
            if let Some(slack) = slack_of[i] {
                coeffs[slack] = match row.sense {
                    ConstraintSense::Ge => -BigRational::one(),
                    _ => BigRational::one(),
                };
            }

            let mut rhs = row.rhs.clone();
            if rhs.is_negative() {
                for c in &mut coeffs {
                    *c = -&*c;
                }
                rhs = -rhs;
            }

            match slack_of[i].filter(|&s| coeffs[s].is_one()) {
                Some(slack) => basis.push(slack),
                None => {
                    basis.push(num_cols);
                    artificial_rows.push(i);
                    num_cols += 1;
                }
            }
            dense.push((coeffs, rhs));
        }

        let rows = dense
            .into_iter()
            .enumerate()
            .map(|(i, (mut coeffs, rhs))| {
                coeffs.resize(num_cols, BigRational::zero());
                if basis[i] >= first_artificial {
                    coeffs[basis[i]] = BigRational::one();
                }
                coeffs.push(rhs);
                coeffs
            })
            .collect();

        let mut tableau = Tableau {
            rows,
            basis,
            num_cols,
        };
        let mut budget = self.config.max_iterations;

        if !artificial_rows.is_empty() {
            self.stats.phase_one += 1;
            let mut cost = vec![BigRational::zero(); num_cols];
            for c in cost.iter_mut().skip(first_artificial) {
                *c = -BigRational::one();
            }
            let allowed = vec![true; num_cols];

            match tableau.maximize(&cost, &allowed, &mut budget, &mut self.stats.pivots) {
                Phase::Optimal => {}
                Phase::Unbounded | Phase::Exhausted => return LpResult::Unknown,
            }

            if tableau.objective_value(&cost).is_negative() {
                trace!("phase I optimum is negative, system infeasible");
                return LpResult::Infeasible;
            }

            // Drive remaining (zero-valued) artificials out of the basis
            let mut redundant = Vec::new();
            for i in 0..tableau.rows.len() {
                if tableau.basis[i] < first_artificial {
                    continue;
                }
                match (0..first_artificial).find(|&j| !tableau.rows[i][j].is_zero()) {
                    Some(j) => {
                        tableau.pivot(i, j);
                        self.stats.pivots += 1;
                    }
                    None => redundant.push(i),
                }
            }
            for i in redundant.into_iter().rev() {
                tableau.rows.remove(i);
                tableau.basis.remove(i);
            }
        }

        let mut cost = vec![BigRational::zero(); num_cols];
        for (&var, coeff) in &self.objective {
            let Some(&(pos, neg)) = columns.get(var) else {
                continue;
            };
            let signed = match self.direction {
                OptDir::Maximize => coeff.clone(),
                OptDir::Minimize => -coeff.clone(),
            };
            if let Some(neg) = neg {
                cost[neg] -= &signed;
            }
            cost[pos] += signed;
        }
        let allowed: Vec<bool> = (0..num_cols).map(|j| j < first_artificial).collect();

        match tableau.maximize(&cost, &allowed, &mut budget, &mut self.stats.pivots) {
            Phase::Optimal => {}
            Phase::Unbounded => return LpResult::Unbounded,
            Phase::Exhausted => return LpResult::Unknown,
        }

        let mut objective = tableau.objective_value(&cost);
        if self.direction == OptDir::Minimize {
            objective = -objective;
        }

        let values = columns
            .iter()
            .enumerate()
            .map(|(var, &(pos, neg))| {
                let mut value = tableau.column_value(pos);
                if let Some(neg) = neg {
                    value -= tableau.column_value(neg);
                }
                (var, value)
            })
            .collect();

        LpResult::Optimal { objective, values }
    }
}
