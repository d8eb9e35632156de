//! Assume-guarantee contracts with declared inputs and outputs.
//!
//! An [`IoContract`] promises its guarantees over inputs and outputs
//! whenever its environment keeps the assumptions over the inputs.
//!
//! ## Composition
//!
//! Connecting two contracts hides the *internal* variables: outputs of one
//! that feed inputs of the other. The composite's
//!
//! - assumptions are the union of both assumption sets, abduced against
//!   the union of the guarantees so that neither internal nor output
//!   variables remain;
//! - guarantees are the union of both guarantee sets, deduced against the
//!   union of the assumptions so that no internal variable remains.
//!
//! ## References
//!
//! - Benveniste et al., "Contracts for System Design", Foundations and
//!   Trends in Electronic Design Automation, 2018
//! - Incer et al., "Pacti: Scaling Assume-Guarantee Reasoning for
//!   System Analysis and Design", 2023

use crate::error::{GearError, Result};
use crate::term_set::TermSet;
use crate::transform::TransformEngine;
use crate::variable::{Var, VarSet};
use std::fmt;
use tracing::debug;

/// An assumption/guarantee pair over declared inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoContract {
    assumptions: TermSet,
    guarantees: TermSet,
    inputs: VarSet,
    outputs: VarSet,
}

impl IoContract {
    /// Create a contract.
    ///
    /// Assumptions may only mention inputs; guarantees may only mention
    /// inputs and outputs.
    pub fn new(
        assumptions: TermSet,
        guarantees: TermSet,
        inputs: VarSet,
        outputs: VarSet,
    ) -> Result<Self> {
        let stray: VarSet = assumptions.vars().difference(&inputs).cloned().collect();
        if !stray.is_empty() {
            return Err(GearError::MalformedTerm(format!(
                "assumptions {{{}}} mention non-input variables {}",
                assumptions,
                render(&stray)
            )));
        }

        let declared: VarSet = inputs.union(&outputs).cloned().collect();
        let stray: VarSet = guarantees.vars().difference(&declared).cloned().collect();
        if !stray.is_empty() {
            return Err(GearError::MalformedTerm(format!(
                "guarantees {{{}}} mention undeclared variables {}",
                guarantees,
                render(&stray)
            )));
        }

        Ok(Self {
            assumptions,
            guarantees,
            inputs,
            outputs,
        })
    }

    /// Get the assumptions.
    pub fn assumptions(&self) -> &TermSet {
        &self.assumptions
    }

    /// Get the guarantees.
    pub fn guarantees(&self) -> &TermSet {
        &self.guarantees
    }

    /// Get the input variables.
    pub fn inputs(&self) -> &VarSet {
        &self.inputs
    }

    /// Get the output variables.
    pub fn outputs(&self) -> &VarSet {
        &self.outputs
    }

    /// Inputs and outputs together.
    pub fn vars(&self) -> VarSet {
        self.inputs.union(&self.outputs).cloned().collect()
    }

    /// Two contracts compose when no variable is an output of both.
    pub fn composable(&self, other: &IoContract) -> bool {
        self.outputs.is_disjoint(&other.outputs)
    }

    /// Compose with `other` using the default configuration.
    pub fn compose(&self, other: &IoContract) -> Result<IoContract> {
        self.compose_with(other, &mut TransformEngine::default_config())
    }

    /// Compose with `other` using a caller-owned engine.
    pub fn compose_with(
        &self,
        other: &IoContract,
        engine: &mut TransformEngine,
    ) -> Result<IoContract> {
        if !self.composable(other) {
            let shared: VarSet = self.outputs.intersection(&other.outputs).cloned().collect();
            return Err(GearError::NotComposable(render(&shared)));
        }

        let internal: VarSet = self
            .outputs
            .intersection(&other.inputs)
            .chain(self.inputs.intersection(&other.outputs))
            .cloned()
            .collect();
        let inputs: VarSet = self
            .inputs
            .union(&other.inputs)
            .filter(|v| !internal.contains(*v))
            .cloned()
            .collect();
        let outputs: VarSet = self
            .outputs
            .union(&other.outputs)
            .filter(|v| !internal.contains(*v))
            .cloned()
            .collect();
        debug!(
            internal = %render(&internal),
            inputs = %render(&inputs),
            outputs = %render(&outputs),
            "composing contracts"
        );

        let all_assumptions = &self.assumptions | &other.assumptions;
        let all_guarantees = &self.guarantees | &other.guarantees;

        let hidden: VarSet = internal.union(&outputs).cloned().collect();
        let assumptions = engine.abduce(&all_assumptions, &all_guarantees, &hidden)?;
        let residual = assumptions.terms_with_vars(&hidden);
        if !residual.is_empty() {
            let targets = residual.vars().intersection(&hidden).count();
            return Err(GearError::InsufficientHelpers {
                term: residual.to_string(),
                helpers: 0,
                targets,
            });
        }
        let guarantees = engine.deduce(&all_guarantees, &all_assumptions, &internal)?;

        IoContract::new(assumptions, guarantees, inputs, outputs)
    }

    /// Check whether `self` refines `other` using the default configuration.
    ///
    /// `self` refines `other` when it accepts every environment `other`
    /// accepts and, within those environments, promises at least as much.
    pub fn refines(&self, other: &IoContract) -> Result<bool> {
        self.refines_with(other, &mut TransformEngine::default_config())
    }

    /// [`refines`](Self::refines) with a caller-owned engine.
    pub fn refines_with(&self, other: &IoContract, engine: &mut TransformEngine) -> Result<bool> {
        if !engine.implies(&other.assumptions, &self.assumptions)? {
            return Ok(false);
        }
        let promised = &self.guarantees | &other.assumptions;
        engine.implies(&promised, &other.guarantees)
    }
}

impl fmt::Display for IoContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "A: {}", self.assumptions)?;
        write!(f, "G: {}", self.guarantees)
    }
}

fn render(vars: &VarSet) -> String {
    let names: Vec<&str> = vars.iter().map(Var::name).collect();
    format!("[{}]", names.join(", "))
}
