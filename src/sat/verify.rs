#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Independent checking of candidate assignments.
//!
//! The verifier does not share any code path with the search beyond the
//! basic data types, so a passing check is real evidence that a model is
//! correct.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::{SolveError, VerifyError};
use crate::sat::solver::SolveResult;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};

/// How a variable that is missing from the assignment is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum VerifyPolicy {
    /// A missing variable is free, so any literal on it counts as satisfied.
    #[default]
    Permissive,
    /// A missing variable is an error.
    Strict,
}

impl Display for VerifyPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Value given to free variables before a solver's model is checked.
pub const FREE_VARIABLE_VALUE: bool = false;

/// Returns whether `assignment` satisfies every clause of `cnf`.
///
/// # Arguments
///
/// * `cnf` - The formula to check.
/// * `assignment` - The candidate model, possibly partial.
/// * `policy` - How variables missing from `assignment` are treated.
///
/// # Errors
///
/// Under [`VerifyPolicy::Strict`], [`VerifyError::Unassigned`] for any
/// unassigned variable in any clause. Clauses are scanned in order and each
/// clause literal by literal, and a missing variable is an error even in a
/// clause that an earlier literal already satisfies. The variable reported is
/// the first one met in that order.
pub fn verify(cnf: &Cnf, assignment: &Assignment, policy: VerifyPolicy) -> Result<bool, VerifyError> {
    for clause in cnf.iter() {
        if !clause_satisfied(clause, assignment, policy)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Every literal of `clause` is inspected, so under the strict policy an
/// unassigned variable is reported whether or not the clause is satisfied.
fn clause_satisfied(
    clause: &Clause,
    assignment: &Assignment,
    policy: VerifyPolicy,
) -> Result<bool, VerifyError> {
    let mut satisfied = false;
    for &lit in clause {
        match (assignment.literal_value(lit), policy) {
            (Some(value), _) => satisfied |= value,
            (None, VerifyPolicy::Permissive) => satisfied = true,
            (None, VerifyPolicy::Strict) => return Err(VerifyError::Unassigned(lit.variable())),
        }
    }
    Ok(satisfied)
}

/// Checks solver output against a formula under a fixed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verifier {
    /// Treatment of variables missing from a checked assignment.
    pub policy: VerifyPolicy,
}

impl Verifier {
    #[must_use]
    pub const fn new(policy: VerifyPolicy) -> Self {
        Self { policy }
    }

    /// See [`verify`].
    ///
    /// # Errors
    ///
    /// As for [`verify`].
    pub fn verify(&self, cnf: &Cnf, assignment: &Assignment) -> Result<bool, VerifyError> {
        verify(cnf, assignment, self.policy)
    }

    /// Accepts `Unsat` as is and requires a `Sat` model to satisfy `cnf`.
    ///
    /// Variables the model leaves out vanished during simplification and are
    /// free, so they are first set to [`FREE_VARIABLE_VALUE`]. A correct
    /// partial model therefore passes under either policy.
    ///
    /// # Errors
    ///
    /// [`SolveError::VerificationFailed`] if the model falsifies a clause,
    /// which means the solver has a bug.
    pub fn check(&self, cnf: &Cnf, result: &SolveResult) -> Result<(), SolveError> {
        match result {
            SolveResult::Unsat => Ok(()),
            SolveResult::Sat(model) => {
                let total = model.completed(cnf.variables(), FREE_VARIABLE_VALUE);
                if self.verify(cnf, &total)? {
                    Ok(())
                } else {
                    Err(SolveError::VerificationFailed)
                }
            }
        }
    }
}
