//! Redundancy reduction and entailment over term sets.
//!
//! Bridges [`TermSet`] and the matrix-level [`PolytopeReducer`]: a set of
//! terms becomes `A·x ≤ b` over its variables ordered by name, the reducer
//! drops rows implied by the others (and by an optional helper set), and
//! the surviving rows are read back as terms.
//!
//! ## Algorithm
//!
//! 1. Columns are the union of the set's and the helpers' variables
//! 2. The joint system must be feasible, otherwise `Infeasible`
//! 3. Each row `aᵢ·x ≤ bᵢ` is probed in order: maximize `aᵢ·x` with the row
//!    relaxed to `bᵢ + 1`; if the optimum stays within `bᵢ` the row is
//!    removed before the next probe
//!
//! A single pass is a fixed point, so reducing twice changes nothing.

use crate::error::{GearError, Result};
use crate::term::Term;
use crate::term_set::TermSet;
use crate::variable::Var;
use gear_math::{MathError, Polytope, PolytopeReducer};
use tracing::debug;

/// A term set in matrix form together with its helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolytopePair {
    /// Column variables, ordered by name
    pub vars: Vec<Var>,
    /// Rows of the set itself (`A`, `b`)
    pub polytope: Polytope,
    /// Rows of the helper set (`A_h`, `b_h`) over the same columns
    pub helpers: Polytope,
}

impl TermSet {
    /// Encode this set and `helpers` as polytopes over a shared column order.
    pub fn to_polytope(&self, helpers: Option<&TermSet>) -> Result<PolytopePair> {
        let mut vars = self.vars();
        if let Some(h) = helpers {
            vars.extend(h.vars());
        }
        let vars: Vec<Var> = vars.into_iter().collect();

        let polytope = rows_of(self, &vars)?;
        let helpers = match helpers {
            Some(h) => rows_of(h, &vars)?,
            None => Polytope::new(vars.len()),
        };
        Ok(PolytopePair {
            vars,
            polytope,
            helpers,
        })
    }

    /// Decode `A·x ≤ b` with columns named by `vars`.
    pub fn from_polytope(polytope: &Polytope, vars: &[Var]) -> Result<TermSet> {
        if polytope.dim() != vars.len() {
            return Err(MathError::ShapeMismatch {
                expected: vars.len(),
                found: polytope.dim(),
            }
            .into());
        }
        Ok(polytope
            .rows()
            .iter()
            .zip(polytope.bounds())
            .map(|(row, bound)| Term::from_row(vars, row, bound.clone()))
            .collect())
    }

    /// Remove every term implied by the others together with `helpers`.
    ///
    /// Fails with [`GearError::Infeasible`] when the set and its helpers
    /// admit no common point.
    pub fn simplify(&self, helpers: Option<&TermSet>) -> Result<TermSet> {
        self.simplify_with(helpers, &mut PolytopeReducer::default_config())
    }

    /// [`simplify`](Self::simplify) with a caller-owned reducer.
    pub fn simplify_with(
        &self,
        helpers: Option<&TermSet>,
        reducer: &mut PolytopeReducer,
    ) -> Result<TermSet> {
        if self.is_empty() {
            return Ok(TermSet::new());
        }

        let pair = self.to_polytope(helpers)?;
        let reduced = match reducer.reduce(&pair.polytope, Some(&pair.helpers)) {
            Ok(reduced) => reduced,
            Err(MathError::Infeasible) => {
                return Err(GearError::Infeasible(match helpers {
                    Some(h) if !h.is_empty() => format!("{{{}}} with helpers {{{}}}", self, h),
                    _ => format!("{{{}}}", self),
                }));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            before = self.len(),
            after = reduced.num_rows(),
            "simplified term set"
        );
        TermSet::from_polytope(&reduced, &pair.vars)
    }

    /// Check whether this set entails every term of `other`.
    ///
    /// An infeasible set entails everything.
    pub fn implies(&self, other: &TermSet) -> Result<bool> {
        self.implies_with(other, &mut PolytopeReducer::default_config())
    }

    /// [`implies`](Self::implies) with a caller-owned reducer.
    pub fn implies_with(&self, other: &TermSet, reducer: &mut PolytopeReducer) -> Result<bool> {
        let pair = self.to_polytope(Some(other))?;
        for term in other {
            let row = term.row(&pair.vars);
            if !reducer.entails(&pair.polytope, &row, term.constant())? {
                debug!(%term, "term not entailed");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check whether the conjunction has at least one solution.
    pub fn is_feasible(&self) -> Result<bool> {
        let pair = self.to_polytope(None)?;
        Ok(PolytopeReducer::default_config().is_feasible(&[&pair.polytope])?)
    }
}

fn rows_of(set: &TermSet, vars: &[Var]) -> Result<Polytope> {
    let mut polytope = Polytope::new(vars.len());
    for term in set {
        polytope.push_row(term.row(vars), term.constant().clone())?;
    }
    Ok(polytope)
}
