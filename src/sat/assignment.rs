//! Partial truth assignments.
//!
//! An `Assignment` maps variables to Boolean values. The search extends it by
//! value: every branch clones its parent's assignment and adds to the copy, so
//! sibling branches never observe each other's choices.

use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(FxHashMap<Variable, bool>);

impl Assignment {
    /// An empty assignment. Every top-level solve starts from one of these.
    #[must_use]
    pub fn new() -> Self {
        Self(FxHashMap::default())
    }

    /// Sets `var` to `value`, returning the value it had before.
    pub fn assign(&mut self, var: Variable, value: bool) -> Option<bool> {
        self.0.insert(var, value)
    }

    /// Makes `lit` true.
    pub fn assign_literal(&mut self, lit: Literal) -> Option<bool> {
        self.assign(lit.variable(), lit.polarity())
    }

    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.0.get(&var).copied()
    }

    /// The truth value of `lit`, or `None` if its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.variable()).map(|v| lit.agrees_with(v))
    }

    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.0.contains_key(&var)
    }

    /// Copies every entry of `other` into `self`. Entries in `other` win.
    pub fn merge(&mut self, other: &Self) {
        self.0.extend(other.0.iter().map(|(&k, &v)| (k, v)));
    }

    /// A copy of `self` with `var` set to `value`.
    #[must_use]
    pub fn extended(&self, var: Variable, value: bool) -> Self {
        let mut next = self.clone();
        next.assign(var, value);
        next
    }

    /// A copy of `self` in which every variable of `vars` that has no value
    /// yet is set to `value`. Existing entries are kept.
    #[must_use]
    pub fn completed(&self, vars: impl IntoIterator<Item = Variable>, value: bool) -> Self {
        let mut total = self.clone();
        for var in vars {
            total.0.entry(var).or_insert(value);
        }
        total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v)).sorted_unstable()
    }

    /// The assignment as literals, one per variable, in ascending variable order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.iter().map(|(var, value)| Literal::new(var, value))
    }

    /// Signed variables, positive meaning true.
    #[must_use]
    pub fn to_i32s(&self) -> Vec<i32> {
        self.literals().map(Literal::to_i32).collect()
    }
}

impl FromIterator<Literal> for Assignment {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|lit| (lit.variable(), lit.polarity()))
                .collect(),
        )
    }
}

impl FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Variable, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literals().join(" "))
    }
}
