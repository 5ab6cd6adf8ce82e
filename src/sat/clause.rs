#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses: disjunctions of literals with set semantics.

use crate::sat::assignment::Assignment;
use crate::sat::error::FormulaError;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Inline capacity of a clause before it spills to the heap.
pub const CLAUSE_INLINE: usize = 8;

pub type LiteralStorage = SmallVec<[Literal; CLAUSE_INLINE]>;

/// A disjunction of literals.
///
/// Literals are kept sorted and deduplicated, so two clauses holding the same
/// set of literals compare equal regardless of input order. The empty clause
/// is false under every assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    /// Builds a clause from signed integers.
    ///
    /// # Panics
    ///
    /// If any value is zero. Use [`Clause::try_new`] for untrusted input.
    #[must_use]
    pub fn new<I: IntoIterator<Item = i32>>(literals: I) -> Self {
        Self::try_new(literals).unwrap_or_else(|e| panic!("invalid clause: {e}"))
    }

    /// Builds a clause from signed integers, rejecting zero.
    ///
    /// # Errors
    ///
    /// [`FormulaError`] if a value is zero or `i32::MIN`.
    pub fn try_new<I: IntoIterator<Item = i32>>(literals: I) -> Result<Self, FormulaError> {
        let literals = literals
            .into_iter()
            .map(Literal::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_literals(literals))
    }

    #[must_use]
    pub fn from_literals<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let literals = literals.into_iter().sorted().dedup().collect();
        Self { literals }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.literals.iter().map(|l| l.variable()).dedup()
    }

    #[must_use]
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    /// A clause holding both `v` and `-v` is true under every assignment.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.variable() == b.variable())
    }

    /// Applies `assignment` to the clause.
    ///
    /// Returns `None` when some literal agrees with its variable's value, and
    /// otherwise the clause with every falsified literal struck out.
    #[must_use]
    pub fn assign(&self, assignment: &Assignment) -> Option<Self> {
        let mut kept = LiteralStorage::new();
        for &lit in &self.literals {
            match assignment.literal_value(lit) {
                Some(true) => return None,
                Some(false) => {}
                None => kept.push(lit),
            }
        }
        Some(Self { literals: kept })
    }

    #[must_use]
    pub fn to_i32s(&self) -> Vec<i32> {
        self.literals.iter().map(|l| l.to_i32()).collect()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::from_literals(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.iter().copied())
    }
}

/// DIMACS form: the literals followed by the `0` terminator.
impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for lit in &self.literals {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}
