//! Linear inequality terms.
//!
//! A [`Term`] is the inequality `Σ aᵢ·vᵢ ≤ c` with exact rational
//! coefficients. Coefficients are kept in a sorted map with zero entries
//! dropped, so two terms describing the same inequality compare equal and
//! hash identically.
//!
//! Terms are values: every operation returns a new term.

use crate::variable::{Var, VarSet};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

/// A linear inequality `Σ coeffs[v]·v ≤ constant`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Term {
    coeffs: BTreeMap<Var, BigRational>,
    constant: BigRational,
}

impl Term {
    /// Create a term from `(variable, coefficient)` pairs.
    ///
    /// Repeated variables are summed and zero coefficients dropped.
    pub fn new<I, V>(coeffs: I, constant: BigRational) -> Self
    where
        I: IntoIterator<Item = (V, BigRational)>,
        V: Into<Var>,
    {
        let mut map: BTreeMap<Var, BigRational> = BTreeMap::new();
        for (var, c) in coeffs {
            *map.entry(var.into()).or_insert_with(BigRational::zero) += c;
        }
        map.retain(|_, c| !c.is_zero());
        Self {
            coeffs: map,
            constant,
        }
    }

    /// Create a term with integer coefficients.
    pub fn from_integers<I, V>(coeffs: I, constant: i64) -> Self
    where
        I: IntoIterator<Item = (V, i64)>,
        V: Into<Var>,
    {
        Self::new(
            coeffs.into_iter().map(|(v, c)| (v, int(c))),
            int(constant),
        )
    }

    /// `Σ coeffs ≤ constant`.
    pub fn le<I, V>(coeffs: I, constant: BigRational) -> Self
    where
        I: IntoIterator<Item = (V, BigRational)>,
        V: Into<Var>,
    {
        Self::new(coeffs, constant)
    }

    /// `Σ coeffs ≥ constant`, stored as `Σ -coeffs ≤ -constant`.
    pub fn ge<I, V>(coeffs: I, constant: BigRational) -> Self
    where
        I: IntoIterator<Item = (V, BigRational)>,
        V: Into<Var>,
    {
        Self::new(coeffs.into_iter().map(|(v, c)| (v, -c)), -constant)
    }

    /// Rebuild a term from a polytope row over `vars`.
    pub(crate) fn from_row(vars: &[Var], row: &[BigRational], constant: BigRational) -> Self {
        Self::new(vars.iter().cloned().zip(row.iter().cloned()), constant)
    }

    /// Coefficient row of this term over `vars`; absent variables give zero.
    pub(crate) fn row(&self, vars: &[Var]) -> Vec<BigRational> {
        vars.iter().map(|v| self.coefficient_of(v)).collect()
    }

    /// Get the right-hand side.
    #[must_use]
    pub fn constant(&self) -> &BigRational {
        &self.constant
    }

    /// Iterate over `(variable, coefficient)` pairs in variable order.
    pub fn coeffs(&self) -> impl Iterator<Item = (&Var, &BigRational)> {
        self.coeffs.iter()
    }

    /// Coefficient of `var`, zero when absent.
    #[must_use]
    pub fn coefficient_of(&self, var: &Var) -> BigRational {
        self.coeffs.get(var).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Variables with a non-zero coefficient.
    #[must_use]
    pub fn vars(&self) -> VarSet {
        self.coeffs.keys().cloned().collect()
    }

    /// Number of variables with a non-zero coefficient.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.coeffs.len()
    }

    /// Check if `var` has a non-zero coefficient.
    #[must_use]
    pub fn contains_var(&self, var: &Var) -> bool {
        self.coeffs.contains_key(var)
    }

    /// Check if the term mentions none of its variables, i.e. is `0 ≤ c`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Variable-free and always true (`0 ≤ c` with `c ≥ 0`).
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.is_constant() && !self.constant.is_negative()
    }

    /// Variable-free and never true (`0 ≤ c` with `c < 0`).
    #[must_use]
    pub fn is_contradiction(&self) -> bool {
        self.is_constant() && self.constant.is_negative()
    }

    /// Whether the sign of `var`'s coefficient agrees with `positive`.
    ///
    /// With `positive` the test is `coeff ≥ 0`, otherwise `coeff ≤ 0`.
    /// Returns `None` when `var` is absent.
    #[must_use]
    pub fn polarity(&self, var: &Var, positive: bool) -> Option<bool> {
        self.coeffs.get(var).map(|c| {
            if positive {
                !c.is_negative()
            } else {
                !c.is_positive()
            }
        })
    }

    /// Variables of `polarities` present here whose `polarity(v, true)`
    /// equals the requested sign.
    ///
    /// Matching is all-or-nothing: a single present variable with the wrong
    /// sign empties the result.
    #[must_use]
    pub fn matching_vars(&self, polarities: &BTreeMap<Var, bool>) -> VarSet {
        let mut matched = VarSet::new();
        for (var, want) in polarities {
            match self.polarity(var, true) {
                Some(sign) if sign == *want => {
                    matched.insert(var.clone());
                }
                Some(_) => return VarSet::new(),
                None => {}
            }
        }
        matched
    }

    /// Sum of two inequalities: coefficients and constants added.
    #[must_use]
    pub fn add(&self, other: &Term) -> Term {
        let mut coeffs = self.coeffs.clone();
        for (var, c) in &other.coeffs {
            *coeffs.entry(var.clone()).or_insert_with(BigRational::zero) += c;
        }
        coeffs.retain(|_, c| !c.is_zero());
        Term {
            coeffs,
            constant: &self.constant + &other.constant,
        }
    }

    /// Drop `var` from the term, keeping the constant.
    #[must_use]
    pub fn eliminate(&self, var: &Var) -> Term {
        let mut coeffs = self.coeffs.clone();
        coeffs.remove(var);
        Term {
            coeffs,
            constant: self.constant.clone(),
        }
    }

    /// Multiply every coefficient and the constant by `factor`.
    ///
    /// A negative factor flips the inequality's meaning; callers scaling a
    /// replacement expression rely on that.
    #[must_use]
    pub fn scale(&self, factor: &BigRational) -> Term {
        if factor.is_zero() {
            return Term::default();
        }
        Term {
            coeffs: self
                .coeffs
                .iter()
                .map(|(v, c)| (v.clone(), c * factor))
                .collect(),
            constant: &self.constant * factor,
        }
    }

    /// Replace `var` by a solved expression.
    ///
    /// `replacement` encodes `var = Σ replacement.coeffs - replacement.constant`.
    /// The result is `eliminate(var) + scale(replacement, coeff(var))`, or the
    /// term unchanged when `var` is absent.
    #[must_use]
    pub fn substitute(&self, var: &Var, replacement: &Term) -> Term {
        match self.coeffs.get(var) {
            Some(factor) => self.eliminate(var).add(&replacement.scale(factor)),
            None => self.clone(),
        }
    }

    /// Negation of every coefficient and the constant.
    #[must_use]
    pub fn negate(&self) -> Term {
        Term {
            coeffs: self.coeffs.iter().map(|(v, c)| (v.clone(), -c)).collect(),
            constant: -&self.constant,
        }
    }
}

impl<'a> Add<&'a Term> for &'a Term {
    type Output = Term;

    fn add(self, other: &'a Term) -> Term {
        Term::add(self, other)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeffs.is_empty() {
            write!(f, "0")?;
        }
        for (i, (var, c)) in self.coeffs.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", c, var)?;
        }
        write!(f, " <= {}", self.constant)
    }
}

fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}
