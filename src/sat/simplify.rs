#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formula reductions used by the search.
//!
//! Both reductions are built on [`assign_literals`], the batch assignment
//! primitive: every clause satisfied by the batch is dropped and every
//! literal falsified by it is struck. Neither reduction changes whether the
//! formula is satisfiable.
//!
//! - [`UnitPropagation`] assigns every literal that appears as a unit clause.
//!   Two unit clauses of opposite sign on the same variable are a conflict.
//! - [`PureLiteralElimination`] assigns every variable that only ever occurs
//!   with one polarity.
//!
//! Each call performs exactly one pass. Running unit propagation to a fixpoint
//! is the caller's job, since new unit clauses can appear after a batch.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use rustc_hash::FxHashMap;
use std::fmt::Debug;

/// Outcome of one reduction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simplification {
    /// Nothing to do: the formula is returned to the caller untouched and the
    /// batch is empty.
    Unchanged,
    /// The batch `assigned` was applied, producing `cnf`.
    Reduced { cnf: Cnf, assigned: Assignment },
    /// The pass proved the current branch unsatisfiable. `var` is forced both
    /// ways.
    Conflict { var: Variable },
}

impl Simplification {
    /// The assignments produced by this pass, empty unless `Reduced`.
    #[must_use]
    pub fn assigned(&self) -> Option<&Assignment> {
        match self {
            Self::Reduced { assigned, .. } => Some(assigned),
            _ => None,
        }
    }
}

pub trait Simplifier: Debug {
    /// Runs a single pass over `cnf`.
    fn simplify(&self, cnf: &Cnf) -> Simplification;
}

/// Applies several variable assignments to `cnf` at once.
///
/// The result is the same as assigning the variables one at a time in any
/// order.
#[must_use]
pub fn assign_literals(cnf: &Cnf, assignment: &Assignment) -> Cnf {
    cnf.assign(assignment)
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct UnitPropagation;

impl UnitPropagation {
    /// Collects the literal of every unit clause.
    ///
    /// Returns `Err(var)` if two unit clauses force opposite values on `var`.
    fn find_units(cnf: &Cnf) -> Result<Assignment, Variable> {
        let mut forced = Assignment::new();
        for clause in cnf.iter().filter(|c| c.is_unit()) {
            let lit = clause[0];
            if let Some(previous) = forced.assign_literal(lit) {
                if previous != lit.polarity() {
                    return Err(lit.variable());
                }
            }
        }
        Ok(forced)
    }
}

impl Simplifier for UnitPropagation {
    fn simplify(&self, cnf: &Cnf) -> Simplification {
        match Self::find_units(cnf) {
            Err(var) => Simplification::Conflict { var },
            Ok(forced) if forced.is_empty() => Simplification::Unchanged,
            Ok(forced) => Simplification::Reduced {
                cnf: assign_literals(cnf, &forced),
                assigned: forced,
            },
        }
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PureLiteralElimination;

impl PureLiteralElimination {
    /// Every literal whose negation never occurs in `cnf`.
    #[must_use]
    pub fn find_pures(cnf: &Cnf) -> Vec<Literal> {
        // `None` marks a variable seen with both polarities.
        let mut polarity: FxHashMap<Variable, Option<bool>> = FxHashMap::default();

        for &lit in cnf.iter().flat_map(|c| c.iter()) {
            polarity
                .entry(lit.variable())
                .and_modify(|seen| {
                    if *seen != Some(lit.polarity()) {
                        *seen = None;
                    }
                })
                .or_insert(Some(lit.polarity()));
        }

        let mut pures: Vec<Literal> = polarity
            .into_iter()
            .filter_map(|(var, seen)| seen.map(|p| Literal::new(var, p)))
            .collect();
        pures.sort_unstable();
        pures
    }
}

impl Simplifier for PureLiteralElimination {
    fn simplify(&self, cnf: &Cnf) -> Simplification {
        let pures = Self::find_pures(cnf);
        if pures.is_empty() {
            return Simplification::Unchanged;
        }
        let assigned: Assignment = pures.into_iter().collect();
        Simplification::Reduced {
            cnf: assign_literals(cnf, &assigned),
            assigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;

    fn reduced(s: Simplification) -> (Cnf, Assignment) {
        match s {
            Simplification::Reduced { cnf, assigned } => (cnf, assigned),
            other => panic!("expected a reduction, got {other:?}"),
        }
    }

    #[test]
    fn test_assign_literals_drops_and_strikes() {
        let cnf = Cnf::new(vec![vec![1, 2, 3], vec![-1, -2], vec![-3, 4]]);
        let a: Assignment = [(1, true), (3, false)].into_iter().collect();
        let out = assign_literals(&cnf, &a);
        assert_eq!(out.clauses, vec![Clause::new(vec![-2])]);
    }

    #[test]
    fn test_assign_literals_empty_clause() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![3]]);
        let a: Assignment = [(1, false), (2, false)].into_iter().collect();
        let out = assign_literals(&cnf, &a);
        assert!(out.has_empty_clause());
    }

    #[test]
    fn test_unit_propagation_batches_all_units() {
        let cnf = Cnf::new(vec![vec![1], vec![-2], vec![1, 3], vec![2, 3, 4]]);
        let (out, assigned) = reduced(UnitPropagation.simplify(&cnf));
        assert_eq!(assigned.to_i32s(), vec![1, -2]);
        assert_eq!(out.clauses, vec![Clause::new(vec![3, 4])]);
    }

    #[test]
    fn test_unit_propagation_conflict() {
        let cnf = Cnf::new(vec![vec![1], vec![2, 3], vec![-1]]);
        assert_eq!(
            UnitPropagation.simplify(&cnf),
            Simplification::Conflict { var: 1 }
        );
    }

    #[test]
    fn test_unit_propagation_duplicate_units_agree() {
        let cnf = Cnf::new(vec![vec![-4], vec![-4], vec![4, 5]]);
        let (out, assigned) = reduced(UnitPropagation.simplify(&cnf));
        assert_eq!(assigned.to_i32s(), vec![-4]);
        assert_eq!(out.clauses, vec![Clause::new(vec![5])]);
    }

    #[test]
    fn test_unit_propagation_exposes_new_units() {
        let cnf = Cnf::new(vec![vec![1], vec![-1, 2], vec![-2, 3, 4]]);
        let (out, _) = reduced(UnitPropagation.simplify(&cnf));
        assert_eq!(out.clauses, vec![Clause::new(vec![2]), Clause::new(vec![-2, 3, 4])]);
        let (out, assigned) = reduced(UnitPropagation.simplify(&out));
        assert_eq!(assigned.to_i32s(), vec![2]);
        assert_eq!(out.clauses, vec![Clause::new(vec![3, 4])]);
    }

    #[test]
    fn test_unit_propagation_idempotent() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2]]);
        assert_eq!(UnitPropagation.simplify(&cnf), Simplification::Unchanged);
    }

    #[test]
    fn test_find_pures() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![-3, 1]]);
        let pures = PureLiteralElimination::find_pures(&cnf);
        assert_eq!(pures, vec![Literal::new(2, true), Literal::new(3, false)]);
    }

    #[test]
    fn test_pure_literal_elimination() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -3], vec![-1, 4]]);
        let (out, assigned) = reduced(PureLiteralElimination.simplify(&cnf));
        assert_eq!(assigned.to_i32s(), vec![2, -3, 4]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_pure_literal_elimination_idempotent() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2]]);
        assert_eq!(PureLiteralElimination.simplify(&cnf), Simplification::Unchanged);
        assert_eq!(PureLiteralElimination.simplify(&Cnf::default()), Simplification::Unchanged);
    }
}
