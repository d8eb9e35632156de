//! Finite sets of terms.
//!
//! A [`TermSet`] is a conjunction of inequalities. Terms are stored in
//! their canonical order (see [`Term`]'s `Ord`), which fixes the order in
//! which redundancy probes and helper selection visit them: the same set
//! always produces the same result regardless of how it was assembled.

use crate::term::Term;
use crate::variable::{Var, VarSet};
use num_rational::BigRational;
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;
use std::ops::{BitAnd, BitOr, Sub};

/// A finite set of terms, read as their conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TermSet {
    terms: BTreeSet<Term>,
}

impl TermSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// `Σ coeffs = constant` as the two terms `≤` and `≥`.
    pub fn equality<I, V>(coeffs: I, constant: BigRational) -> Self
    where
        I: IntoIterator<Item = (V, BigRational)>,
        V: Into<Var>,
    {
        let le = Term::le(coeffs, constant);
        let ge = le.negate();
        [le, ge].into_iter().collect()
    }

    /// Insert a term; returns `false` if it was already present.
    pub fn insert(&mut self, term: Term) -> bool {
        self.terms.insert(term)
    }

    /// Remove a term; returns `false` if it was absent.
    pub fn remove(&mut self, term: &Term) -> bool {
        self.terms.remove(term)
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, term: &Term) -> bool {
        self.terms.contains(term)
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate in canonical order.
    pub fn iter(&self) -> btree_set::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Union of all terms' variables.
    #[must_use]
    pub fn vars(&self) -> VarSet {
        self.terms.iter().flat_map(|t| t.coeffs().map(|(v, _)| v.clone())).collect()
    }

    /// Terms mentioning at least one variable of `vars`.
    #[must_use]
    pub fn terms_with_vars(&self, vars: &VarSet) -> TermSet {
        self.terms
            .iter()
            .filter(|t| vars.iter().any(|v| t.contains_var(v)))
            .cloned()
            .collect()
    }

    /// Set union.
    #[must_use]
    pub fn union(&self, other: &TermSet) -> TermSet {
        self.terms.union(&other.terms).cloned().collect()
    }

    /// Set intersection.
    #[must_use]
    pub fn intersection(&self, other: &TermSet) -> TermSet {
        self.terms.intersection(&other.terms).cloned().collect()
    }

    /// Set difference.
    #[must_use]
    pub fn difference(&self, other: &TermSet) -> TermSet {
        self.terms.difference(&other.terms).cloned().collect()
    }
}

impl FromIterator<Term> for TermSet {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Term> for TermSet {
    fn extend<I: IntoIterator<Item = Term>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl IntoIterator for TermSet {
    type Item = Term;
    type IntoIter = btree_set::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = btree_set::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl BitOr for &TermSet {
    type Output = TermSet;

    fn bitor(self, rhs: &TermSet) -> TermSet {
        self.union(rhs)
    }
}

impl BitAnd for &TermSet {
    type Output = TermSet;

    fn bitand(self, rhs: &TermSet) -> TermSet {
        self.intersection(rhs)
    }
}

impl Sub for &TermSet {
    type Output = TermSet;

    fn sub(self, rhs: &TermSet) -> TermSet {
        self.difference(rhs)
    }
}

impl fmt::Display for TermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}
