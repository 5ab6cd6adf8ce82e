//! The common solver interface and result types.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::error::SolveError;
use crate::sat::verify::Verifier;

/// Final verdict of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// The formula is satisfiable. Variables missing from the assignment
    /// vanished during simplification and may take any value.
    Sat(Assignment),
    Unsat,
}

impl SolveResult {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Assignment> {
        match self {
            Self::Sat(a) => Some(a),
            Self::Unsat => None,
        }
    }

    #[must_use]
    pub fn into_model(self) -> Option<Assignment> {
        match self {
            Self::Sat(a) => Some(a),
            Self::Unsat => None,
        }
    }
}

impl From<Option<Assignment>> for SolveResult {
    fn from(value: Option<Assignment>) -> Self {
        value.map_or(Self::Unsat, Self::Sat)
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branching decisions taken.
    pub decisions: usize,
    /// Search nodes that ended in a falsified clause or a unit conflict.
    pub conflicts: usize,
    /// Literals forced by unit propagation.
    pub propagations: usize,
    /// Literals assigned by pure literal elimination.
    pub pure_literals: usize,
    /// Deepest recursion level reached.
    pub max_depth: usize,
}

/// A complete decision procedure for CNF formulas.
pub trait Solver {
    /// Creates a solver for `cnf` with its default configuration.
    ///
    /// # Arguments
    ///
    /// * `cnf` - The formula to solve. The solver keeps it unchanged.
    ///
    /// # Returns
    ///
    /// A solver that has not searched yet.
    fn new(cnf: Cnf) -> Self;

    /// Runs the search from an empty assignment.
    fn solve(&mut self) -> SolveResult;

    /// Counters from the most recent call to [`Solver::solve`].
    fn stats(&self) -> SolutionStats;

    /// The formula the solver was created with.
    fn cnf(&self) -> &Cnf;

    /// The verifier used by [`Solver::solve_checked`], carrying the
    /// configured policy.
    fn verifier(&self) -> Verifier;

    /// Runs the search and independently checks any model it returns.
    ///
    /// Free variables are filled in before the check (see
    /// [`Verifier::check`]), so correct partial models pass under the strict
    /// policy too.
    ///
    /// # Errors
    ///
    /// [`SolveError::VerificationFailed`] if the search returns a model that
    /// does not satisfy the formula.
    fn solve_checked(&mut self) -> Result<SolveResult, SolveError> {
        let result = self.solve();
        self.verifier().check(self.cnf(), &result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(SolveResult::from(None), SolveResult::Unsat);
        let a: Assignment = [(1, true)].into_iter().collect();
        let result = SolveResult::from(Some(a.clone()));
        assert!(result.is_sat());
        assert_eq!(result.model(), Some(&a));
        assert_eq!(result.into_model(), Some(a));
    }
}
