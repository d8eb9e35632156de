//! Abduction and deduction over term sets.
//!
//! Both transformations rewrite a reference set so that it no longer
//! mentions a chosen set of variables, using a context set whose terms
//! serve as substitution helpers.
//!
//! - **Abduction** strengthens: the result, together with the context,
//!   implies the reference. Used for the assumptions of a composition.
//! - **Deduction** weakens: the reference together with the context
//!   implies the result. Used for the guarantees of a composition.
//!
//! ## Algorithm
//!
//! 1. Reduce the reference against the context
//! 2. For each remaining term, record the coefficient sign of every
//!    variable to eliminate (`≥ 0` for abduction, `≤ 0` for deduction)
//! 3. Walk the helper pool in order, taking each helper that carries a
//!    not yet covered variable with the recorded sign; taken helpers are
//!    consumed for the rest of the pass; every recorded variable must end
//!    up covered
//! 4. Read the taken helpers as equalities and solve them for the
//!    eliminable variables they mention; this needs exactly one helper
//!    per such variable
//! 5. Substitute the solutions into the term
//! 6. For deduction, drop terms that still mention an eliminated variable
//! 7. Reduce the result
//!
//! A term whose substitution collapses to `0 ≤ c` is dropped when `c ≥ 0`
//! and treated as a failed elimination when `c < 0`.

use crate::config::{HelperPolicy, TransformConfig};
use crate::error::{GearError, Result};
use crate::solve::values_of_vars_to_elim_with;
use crate::term::Term;
use crate::term_set::TermSet;
use crate::variable::{Var, VarSet};
use gear_math::{LinearSystemSolver, PolytopeReducer};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Direction of a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    /// Strengthen the reference
    Abduction,
    /// Weaken the reference
    Deduction,
}

impl TransformMode {
    /// Coefficient sign recorded for eliminable variables.
    fn polarity(self) -> bool {
        matches!(self, TransformMode::Abduction)
    }
}

/// Outcome of transforming a single term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOutcome {
    /// The term mentions no variable to eliminate
    Untouched,
    /// Substitution produced a new term
    Rewritten(Term),
    /// Substitution produced a tautology
    Vacuous,
    /// Substitution produced a contradiction; helpers were not consumed
    Failed,
}

/// Statistics for transformations.
#[derive(Debug, Clone, Default)]
pub struct TransformStats {
    /// Reference terms visited
    pub terms_visited: u64,
    /// Terms rewritten by substitution
    pub terms_rewritten: u64,
    /// Terms whose elimination failed and fell back to the policy
    pub terms_failed: u64,
    /// Terms removed because they still mention eliminated variables
    pub terms_dropped: u64,
    /// Helper terms consumed
    pub helpers_consumed: u64,
}

/// Abduction/deduction engine.
#[derive(Debug, Default)]
pub struct TransformEngine {
    config: TransformConfig,
    reducer: PolytopeReducer,
    solver: LinearSystemSolver,
    stats: TransformStats,
}

impl TransformEngine {
    /// Create a new engine.
    pub fn new(config: TransformConfig) -> Self {
        Self {
            reducer: PolytopeReducer::new(config.reducer.clone()),
            solver: LinearSystemSolver::new(),
            config,
            stats: TransformStats::default(),
        }
    }

    /// Create with default configuration.
    pub fn default_config() -> Self {
        Self::new(TransformConfig::default())
    }

    /// Get configuration.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Get statistics.
    pub fn stats(&self) -> &TransformStats {
        &self.stats
    }

    /// Get the reducer's statistics.
    pub fn reducer_stats(&self) -> &gear_math::ReducerStats {
        self.reducer.stats()
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = TransformStats::default();
        self.reducer.reset_stats();
        self.solver.reset_stats();
    }

    /// Reduce `terms` against `helpers` with this engine's reducer.
    pub fn simplify(&mut self, terms: &TermSet, helpers: Option<&TermSet>) -> Result<TermSet> {
        terms.simplify_with(helpers, &mut self.reducer)
    }

    /// Check entailment with this engine's reducer.
    pub fn implies(&mut self, premises: &TermSet, conclusions: &TermSet) -> Result<bool> {
        premises.implies_with(conclusions, &mut self.reducer)
    }

    /// Strengthen `reference` so that it avoids `vars`.
    pub fn abduce(
        &mut self,
        reference: &TermSet,
        context: &TermSet,
        vars: &VarSet,
    ) -> Result<TermSet> {
        self.transform(reference, context, vars, TransformMode::Abduction)
    }

    /// Weaken `reference` so that it avoids `vars`.
    pub fn deduce(
        &mut self,
        reference: &TermSet,
        context: &TermSet,
        vars: &VarSet,
    ) -> Result<TermSet> {
        self.transform(reference, context, vars, TransformMode::Deduction)
    }

    /// Run a full transformation pass.
    pub fn transform(
        &mut self,
        reference: &TermSet,
        context: &TermSet,
        vars: &VarSet,
        mode: TransformMode,
    ) -> Result<TermSet> {
        debug!(
            ?mode,
            reference = %reference,
            context = %context,
            vars = vars.len(),
            "transform"
        );

        let reduced = self.simplify(reference, Some(context))?;
        let mut pool: Vec<Term> = context.iter().cloned().collect();
        let mut result = TermSet::new();

        for term in &reduced {
            self.stats.terms_visited += 1;
            match self.transform_term(term, &mut pool, vars, mode) {
                Ok(TermOutcome::Untouched) => {
                    result.insert(term.clone());
                }
                Ok(TermOutcome::Rewritten(rewritten)) => {
                    self.stats.terms_rewritten += 1;
                    result.insert(rewritten);
                }
                Ok(TermOutcome::Vacuous) => {}
                Ok(TermOutcome::Failed) => {
                    self.stats.terms_failed += 1;
                    result.insert(term.clone());
                }
                Err(GearError::InsufficientHelpers { term: text, helpers, targets })
                    if self.config.insufficient_helpers == HelperPolicy::Retain =>
                {
                    debug!(term = %text, helpers, targets, "insufficient helpers, keeping term");
                    self.stats.terms_failed += 1;
                    result.insert(term.clone());
                }
                Err(e) => return Err(e),
            }
        }

        if mode == TransformMode::Deduction {
            let residual = result.terms_with_vars(vars);
            self.stats.terms_dropped += residual.len() as u64;
            result = &result - &residual;
        }

        self.simplify(&result, None)
    }

    /// Eliminate `vars` from a single term using helpers from `pool`.
    ///
    /// Helpers used by a successful rewrite are removed from `pool`.
    pub fn transform_term(
        &mut self,
        term: &Term,
        pool: &mut Vec<Term>,
        vars: &VarSet,
        mode: TransformMode,
    ) -> Result<TermOutcome> {
        let sign = mode.polarity();
        let targets: BTreeMap<Var, bool> = vars
            .iter()
            .filter_map(|v| term.polarity(v, sign).map(|p| (v.clone(), p)))
            .collect();
        if targets.is_empty() {
            return Ok(TermOutcome::Untouched);
        }

        let mut uncovered: VarSet = targets.keys().cloned().collect();
        let mut chosen: Vec<usize> = Vec::new();
        for (i, helper) in pool.iter().enumerate() {
            if uncovered.is_empty() {
                break;
            }
            let matched = helper.matching_vars(&targets);
            if matched.iter().any(|v| uncovered.contains(v)) {
                trace!(%helper, "selected helper");
                uncovered.retain(|v| !matched.contains(v));
                chosen.push(i);
            }
        }
        if !uncovered.is_empty() {
            return Err(GearError::InsufficientHelpers {
                term: term.to_string(),
                helpers: chosen.len(),
                targets: targets.len(),
            });
        }

        let helpers: TermSet = chosen.iter().map(|&i| pool[i].clone()).collect();
        let eliminable: VarSet = helpers.vars().intersection(vars).cloned().collect();
        if helpers.len() != eliminable.len() {
            return Err(GearError::InsufficientHelpers {
                term: term.to_string(),
                helpers: helpers.len(),
                targets: eliminable.len(),
            });
        }

        let solutions = values_of_vars_to_elim_with(&helpers, vars, &mut self.solver)?;
        let rewritten = solutions
            .iter()
            .fold(term.clone(), |acc, (var, value)| acc.substitute(var, value));

        if rewritten.is_contradiction() {
            debug!(%term, "substitution yields a contradiction");
            return Ok(TermOutcome::Failed);
        }

        for &i in chosen.iter().rev() {
            pool.remove(i);
        }
        self.stats.helpers_consumed += chosen.len() as u64;

        if rewritten.is_tautology() {
            trace!(%term, "substitution yields a tautology");
            return Ok(TermOutcome::Vacuous);
        }
        if solutions.is_empty() {
            return Ok(TermOutcome::Untouched);
        }
        trace!(%term, %rewritten, "rewritten");
        Ok(TermOutcome::Rewritten(rewritten))
    }
}

impl TermSet {
    /// Strengthen this set so that it avoids `vars`, using `context` as
    /// helpers.
    pub fn abduce_with_context(&self, context: &TermSet, vars: &VarSet) -> Result<TermSet> {
        TransformEngine::default_config().abduce(self, context, vars)
    }

    /// Weaken this set so that it avoids `vars`, using `context` as
    /// helpers.
    pub fn deduce_with_context(&self, context: &TermSet, vars: &VarSet) -> Result<TermSet> {
        TransformEngine::default_config().deduce(self, context, vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::var_set;

    fn set(terms: &[Term]) -> TermSet {
        terms.iter().cloned().collect()
    }

    #[test]
    fn test_mode_polarity() {
        assert!(TransformMode::Abduction.polarity());
        assert!(!TransformMode::Deduction.polarity());
    }

    #[test]
    fn test_untouched_term() {
        let mut engine = TransformEngine::default_config();
        let mut pool = vec![Term::from_integers([("x", 1)], 1)];
        let outcome = engine
            .transform_term(
                &Term::from_integers([("y", 1)], 1),
                &mut pool,
                &var_set(["x"]),
                TransformMode::Abduction,
            )
            .unwrap();
        assert_eq!(outcome, TermOutcome::Untouched);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_rewrite_consumes_helper() {
        let mut engine = TransformEngine::default_config();
        let mut pool = vec![
            Term::from_integers([("x", 1), ("y", -1)], 0),
            Term::from_integers([("x", 1), ("z", -1)], 0),
        ];
        let outcome = engine
            .transform_term(
                &Term::from_integers([("x", 1)], -1),
                &mut pool,
                &var_set(["x"]),
                TransformMode::Abduction,
            )
            .unwrap();
        assert_eq!(
            outcome,
            TermOutcome::Rewritten(Term::from_integers([("y", 1)], -1))
        );
        assert_eq!(pool, vec![Term::from_integers([("x", 1), ("z", -1)], 0)]);
        assert_eq!(engine.stats().helpers_consumed, 1);
    }

    #[test]
    fn test_contradiction_keeps_helpers() {
        let mut engine = TransformEngine::default_config();
        let mut pool = vec![Term::from_integers([("x", 2)], 5)];
        let outcome = engine
            .transform_term(
                &Term::from_integers([("x", 2)], 4),
                &mut pool,
                &var_set(["x"]),
                TransformMode::Abduction,
            )
            .unwrap();
        assert_eq!(outcome, TermOutcome::Failed);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_insufficient_helpers_reported() {
        let mut engine = TransformEngine::default_config();
        let mut pool = vec![Term::from_integers([("x", 1), ("z", 1)], 0)];
        let err = engine
            .transform_term(
                &Term::from_integers([("x", 1)], 1),
                &mut pool,
                &var_set(["x", "z"]),
                TransformMode::Abduction,
            )
            .unwrap_err();
        assert_eq!(
            err,
            GearError::InsufficientHelpers {
                term: "1*x <= 1".to_string(),
                helpers: 1,
                targets: 2
            }
        );
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_fail_policy_propagates() {
        let config = TransformConfig {
            insufficient_helpers: HelperPolicy::Fail,
            ..TransformConfig::default()
        };
        let mut engine = TransformEngine::new(config);
        let reference = set(&[Term::from_integers([("x", 1)], 1)]);
        let context = set(&[Term::from_integers([("x", 1), ("z", 1)], 5)]);
        let result = engine.abduce(&reference, &context, &var_set(["x", "z"]));
        assert!(matches!(
            result,
            Err(GearError::InsufficientHelpers { .. })
        ));
    }

    #[test]
    fn test_uncovered_target_reported() {
        let mut engine = TransformEngine::default_config();
        let mut pool = vec![Term::from_integers([("x", -1), ("y", 1)], 0)];
        let err = engine
            .transform_term(
                &Term::from_integers([("x", 1)], -1),
                &mut pool,
                &var_set(["x"]),
                TransformMode::Abduction,
            )
            .unwrap_err();
        assert_eq!(
            err,
            GearError::InsufficientHelpers {
                term: "1*x <= -1".to_string(),
                helpers: 0,
                targets: 1
            }
        );
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_fail_policy_without_matching_helper() {
        let config = TransformConfig {
            insufficient_helpers: HelperPolicy::Fail,
            ..TransformConfig::default()
        };
        let mut engine = TransformEngine::new(config);
        let reference = set(&[Term::from_integers([("x", 1)], -1)]);
        let context = set(&[Term::from_integers([("x", -1), ("y", 1)], 0)]);
        let result = engine.abduce(&reference, &context, &var_set(["x"]));
        assert!(matches!(
            result,
            Err(GearError::InsufficientHelpers { helpers: 0, .. })
        ));

        // The default policy keeps the term as it was
        let mut engine = TransformEngine::default_config();
        let result = engine.abduce(&reference, &context, &var_set(["x"])).unwrap();
        assert_eq!(result, reference);
        assert_eq!(engine.stats().terms_failed, 1);
    }

    #[test]
    fn test_retain_policy_keeps_term() {
        let mut engine = TransformEngine::default_config();
        let reference = set(&[Term::from_integers([("x", 1)], 1)]);
        let context = set(&[Term::from_integers([("x", 1), ("z", 1)], 5)]);
        let result = engine
            .abduce(&reference, &context, &var_set(["x", "z"]))
            .unwrap();
        assert_eq!(result, reference);
        assert_eq!(engine.stats().terms_failed, 1);
    }

    #[test]
    fn test_deduction_drops_residual_terms() {
        let mut engine = TransformEngine::default_config();
        let reference = set(&[
            Term::from_integers([("x", 1)], 1),
            Term::from_integers([("y", 1)], 1),
        ]);
        let result = engine
            .deduce(&reference, &TermSet::new(), &var_set(["x"]))
            .unwrap();
        assert_eq!(result, set(&[Term::from_integers([("y", 1)], 1)]));
        assert_eq!(engine.stats().terms_dropped, 1);
    }

    #[test]
    fn test_tautology_dropped() {
        // x <= 3 with helper x <= 1 read as x = 1 gives 0 <= 2
        let mut engine = TransformEngine::default_config();
        let mut pool = vec![Term::from_integers([("x", 1)], 1)];
        let outcome = engine
            .transform_term(
                &Term::from_integers([("x", 1)], 3),
                &mut pool,
                &var_set(["x"]),
                TransformMode::Abduction,
            )
            .unwrap();
        assert_eq!(outcome, TermOutcome::Vacuous);
        assert!(pool.is_empty());
    }
}
