//! Ordered literal substitutions.
//!
//! A [`Substitutions`] sequence is applied left to right, each pair seeing
//! the output of the previous one. Order is part of the value: the bracketed
//! placeholder must be replaced before the bare one, since the bare token is
//! a substring of the bracketed token.

use std::fmt;

/// One literal `(old, new)` replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPair {
    pub old: String,
    pub new: String,
}

impl SubstitutionPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

impl fmt::Display for SubstitutionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.old, self.new)
    }
}

/// Ordered list of substitution pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pairs: Vec<SubstitutionPair>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair; it runs after every pair already present.
    pub fn then(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.pairs.push(SubstitutionPair::new(old, new));
        self
    }

    /// Pairs that rename the placeholder package everywhere in a file:
    /// `<placeholder>` first, then the bare `placeholder`.
    pub fn package_name(placeholder: &str, package_name: &str) -> Self {
        Self::new()
            .then(format!("<{placeholder}>"), package_name)
            .then(placeholder, package_name)
    }

    pub fn pairs(&self) -> &[SubstitutionPair] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Apply every pair in order. Pairs with an empty `old` are skipped.
    pub fn apply(&self, content: &str) -> String {
        self.pairs
            .iter()
            .filter(|pair| !pair.old.is_empty())
            .fold(content.to_string(), |acc, pair| acc.replace(&pair.old, &pair.new))
    }
}

impl FromIterator<SubstitutionPair> for Substitutions {
    fn from_iter<I: IntoIterator<Item = SubstitutionPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
