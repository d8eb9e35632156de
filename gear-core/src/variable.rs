//! Named variables.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// An immutable named symbol.
///
/// Equality, ordering and hashing go by name; clones share the name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(Arc<str>);

/// An ordered set of variables.
pub type VarSet = BTreeSet<Var>;

impl Var {
    /// Create a variable with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Get the variable's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Var {}>", self.0)
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Var {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&Var> for Var {
    fn from(var: &Var) -> Self {
        var.clone()
    }
}

/// Build a [`VarSet`] from names.
pub fn var_set<I, V>(names: I) -> VarSet
where
    I: IntoIterator<Item = V>,
    V: Into<Var>,
{
    names.into_iter().map(Into::into).collect()
}
