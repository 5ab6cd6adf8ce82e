#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas in conjunctive normal form.
//!
//! A `Cnf` is a conjunction of [`Clause`]s. It is built once per problem and
//! never mutated by the search: simplification and branching always derive a
//! new, smaller `Cnf` so that ancestors keep the formula they need for the
//! alternate branch.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::error::FormulaError;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    /// Largest variable mentioned by any clause.
    pub num_vars: usize,
}

impl Cnf {
    /// Builds a formula from lists of signed integers.
    ///
    /// # Panics
    ///
    /// If any value is zero. Use [`Cnf::try_new`] for untrusted input.
    #[must_use]
    pub fn new<J, I>(clauses: J) -> Self
    where
        J: IntoIterator<Item = I>,
        I: IntoIterator<Item = i32>,
    {
        Self::try_new(clauses).unwrap_or_else(|e| panic!("invalid formula: {e}"))
    }

    /// Builds a formula from lists of signed integers, rejecting zero.
    ///
    /// # Errors
    ///
    /// [`FormulaError`] if any value is not a valid literal.
    pub fn try_new<J, I>(clauses: J) -> Result<Self, FormulaError>
    where
        J: IntoIterator<Item = I>,
        I: IntoIterator<Item = i32>,
    {
        let clauses = clauses
            .into_iter()
            .map(Clause::try_new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_clauses(clauses))
    }

    #[must_use]
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let num_vars = clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|l| l.variable() as usize)
            .max()
            .unwrap_or(0);
        Self { clauses, num_vars }
    }

    /// `true` when no clauses remain, which means the formula is satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `true` when some clause has lost all its literals, which means the
    /// formula is falsified.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Every literal that occurs somewhere in the formula.
    #[must_use]
    pub fn literals(&self) -> FxHashSet<Literal> {
        self.clauses.iter().flat_map(Clause::iter).copied().collect()
    }

    /// Every variable that occurs somewhere in the formula.
    #[must_use]
    pub fn variables(&self) -> FxHashSet<Variable> {
        self.clauses.iter().flat_map(Clause::variables).collect()
    }

    /// The smallest variable occurring in the formula.
    #[must_use]
    pub fn min_variable(&self) -> Option<Variable> {
        self.clauses.iter().flat_map(Clause::variables).min()
    }

    /// Number of literal occurrences across all clauses.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// The formula after applying every entry of `assignment` at once.
    ///
    /// Satisfied clauses are dropped, and falsified literals are struck from
    /// the clauses that remain. `num_vars` is carried over so reports still
    /// describe the original problem.
    #[must_use]
    pub fn assign(&self, assignment: &Assignment) -> Self {
        if assignment.is_empty() {
            return self.clone();
        }
        Self {
            clauses: self
                .clauses
                .iter()
                .filter_map(|c| c.assign(assignment))
                .collect(),
            num_vars: self.num_vars,
        }
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

impl From<Vec<Clause>> for Cnf {
    fn from(clauses: Vec<Clause>) -> Self {
        Self::from_clauses(clauses)
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::from_clauses(iter.into_iter().collect())
    }
}

/// DIMACS rendering with a `p cnf` header.
impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
