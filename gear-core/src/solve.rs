//! Solving term sets as equality systems.
//!
//! Each term `Σ aᵢ·vᵢ ≤ c` is read as the equation `Σ aᵢ·vᵢ = c`. The
//! system must be square in the variables to eliminate; the remaining
//! variables act as parameters of the solution.

use crate::error::{GearError, Result};
use crate::term::Term;
use crate::term_set::TermSet;
use crate::variable::{Var, VarSet};
use gear_math::{LinearEquation, LinearSystemSolver, MathError, VarId};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::trace;

/// Solve `terms`, read as equalities, for the variables of `vars_to_elim`
/// they mention.
///
/// Each returned replacement `r` encodes `x = Σ r.coeffs - r.constant`,
/// the form [`Term::substitute`] expects.
pub fn values_of_vars_to_elim(
    terms: &TermSet,
    vars_to_elim: &VarSet,
) -> Result<BTreeMap<Var, Term>> {
    values_of_vars_to_elim_with(terms, vars_to_elim, &mut LinearSystemSolver::new())
}

/// [`values_of_vars_to_elim`] with a caller-owned solver.
pub fn values_of_vars_to_elim_with(
    terms: &TermSet,
    vars_to_elim: &VarSet,
    solver: &mut LinearSystemSolver,
) -> Result<BTreeMap<Var, Term>> {
    let columns: Vec<Var> = terms.vars().into_iter().collect();
    let index: FxHashMap<&Var, VarId> = columns.iter().enumerate().map(|(i, v)| (v, i)).collect();

    let targets: Vec<VarId> = columns
        .iter()
        .enumerate()
        .filter(|(_, v)| vars_to_elim.contains(*v))
        .map(|(i, _)| i)
        .collect();

    let equations: Vec<LinearEquation> = terms
        .iter()
        .map(|t| {
            LinearEquation::new(
                t.coeffs().map(|(v, c)| (index[v], c.clone())),
                t.constant().clone(),
            )
        })
        .collect();

    let solution = match solver.solve(&equations, &targets) {
        Ok(solution) => solution,
        Err(MathError::Singular) => {
            return Err(GearError::Unsolvable(format!(
                "{{{}}} has no unique solution for {}",
                terms,
                render_vars(targets.iter().map(|&i| &columns[i]))
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let mut result = BTreeMap::new();
    for (id, expr) in solution {
        let var = columns[id].clone();
        let replacement = Term::new(
            expr.coeffs.into_iter().map(|(p, c)| (columns[p].clone(), c)),
            -expr.constant,
        );
        trace!(%var, %replacement, "solved");
        result.insert(var, replacement);
    }
    Ok(result)
}

fn render_vars<'a>(vars: impl Iterator<Item = &'a Var>) -> String {
    let names: Vec<&str> = vars.map(Var::name).collect();
    format!("[{}]", names.join(", "))
}
