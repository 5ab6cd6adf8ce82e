//! Defines the main DPLL (Davis-Putnam-Logemann-Loveland) SAT solver.
//!
//! This module provides the `Dpll` struct, a recursive backtracking decision
//! procedure for formulas in conjunctive normal form. Every call works on its
//! own snapshot of the formula and its own copy of the assignment, so the two
//! branches of a decision never see each other's state and backtracking is
//! simply returning from the call.
//!
//! Each search node runs these steps in order:
//! 1.  **Terminal checks:** no clauses left means satisfied; an empty clause
//!     means this branch is unsatisfiable.
//! 2.  **Unit propagation** (optional): assign every unit clause, repeated
//!     until no unit clause remains or the formula collapses.
//! 3.  **Pure literal elimination** (optional): one pass assigning every
//!     variable that occurs with a single polarity.
//! 4.  **Decision:** branch on the smallest variable still in the formula,
//!     trying `true` before `false` and stopping at the first model found.
//!
//! Recursion depth is bounded by the number of variables, since every
//! decision removes at least one variable from the formula.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::configs::DpllConfig;
use crate::sat::literal::Variable;
use crate::sat::simplify::{
    PureLiteralElimination, Simplification, Simplifier, UnitPropagation, assign_literals,
};
use crate::sat::solver::{SolutionStats, SolveResult, Solver};
use crate::sat::verify::Verifier;
use tracing::{debug, trace};

/// Represents a DPLL SAT solver.
#[derive(Debug, Clone)]
pub struct Dpll {
    /// The formula being solved. Never modified by the search.
    pub cnf: Cnf,
    /// Which heuristics run at each node and how models are checked.
    pub config: DpllConfig,
    stats: SolutionStats,
}

/// What a search node learned before it had to branch.
enum Node {
    Sat(Assignment),
    Unsat,
    Open(Cnf, Assignment),
}

impl Solver for Dpll {
    fn new(cnf: Cnf) -> Self {
        Self::with_config(cnf, DpllConfig::default())
    }

    /// Runs the search from a fresh, empty assignment.
    ///
    /// Statistics are reset first, so repeated calls on the same solver are
    /// independent of each other.
    fn solve(&mut self) -> SolveResult {
        self.stats = SolutionStats::default();
        debug!(
            clauses = self.cnf.len(),
            vars = self.cnf.num_vars,
            unit_propagation = self.config.unit_propagation,
            pure_literal_elimination = self.config.pure_literal_elimination,
            "starting DPLL search"
        );

        let result = SolveResult::from(self.search(self.cnf.clone(), Assignment::new(), 0));

        debug!(
            sat = result.is_sat(),
            decisions = self.stats.decisions,
            conflicts = self.stats.conflicts,
            propagations = self.stats.propagations,
            pure_literals = self.stats.pure_literals,
            max_depth = self.stats.max_depth,
            "DPLL search finished"
        );
        result
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }

    fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    fn verifier(&self) -> Verifier {
        Verifier::new(self.config.verify_policy)
    }
}

impl Dpll {
    /// Creates a solver for `cnf` with an explicit configuration.
    ///
    /// # Arguments
    ///
    /// * `cnf` - The formula to solve.
    /// * `config` - Heuristic switches and the verification policy.
    #[must_use]
    pub fn with_config(cnf: Cnf, config: DpllConfig) -> Self {
        Self {
            cnf,
            config,
            stats: SolutionStats::default(),
        }
    }

    /// One recursive invocation on `(cnf, assignment)`.
    fn search(&mut self, cnf: Cnf, assignment: Assignment, depth: usize) -> Option<Assignment> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let (cnf, assignment) = match self.simplify(cnf, assignment) {
            Node::Sat(model) => return Some(model),
            Node::Unsat => return None,
            Node::Open(cnf, assignment) => (cnf, assignment),
        };

        // Non-empty and free of empty clauses, so some variable remains.
        let var = cnf.min_variable()?;
        self.stats.decisions += 1;

        for value in [true, false] {
            trace!(depth, var, value, "decision");
            let branch = self.branch(&cnf, &assignment, var, value, depth);
            if branch.is_some() {
                return branch;
            }
        }
        None
    }

    fn branch(
        &mut self,
        cnf: &Cnf,
        assignment: &Assignment,
        var: Variable,
        value: bool,
        depth: usize,
    ) -> Option<Assignment> {
        let choice: Assignment = [(var, value)].into_iter().collect();
        let reduced = assign_literals(cnf, &choice);
        self.search(reduced, assignment.extended(var, value), depth + 1)
    }

    /// Terminal checks, then the enabled reductions, re-checking the terminal
    /// conditions after every batch of assignments.
    fn simplify(&mut self, mut cnf: Cnf, mut assignment: Assignment) -> Node {
        if let Some(node) = self.terminal(&cnf, &assignment) {
            return node;
        }

        if self.config.unit_propagation {
            loop {
                match UnitPropagation.simplify(&cnf) {
                    Simplification::Unchanged => break,
                    Simplification::Conflict { var } => {
                        trace!(var, "unit clauses conflict");
                        self.stats.conflicts += 1;
                        return Node::Unsat;
                    }
                    Simplification::Reduced { cnf: next, assigned } => {
                        self.stats.propagations += assigned.len();
                        assignment.merge(&assigned);
                        cnf = next;
                        if let Some(node) = self.terminal(&cnf, &assignment) {
                            return node;
                        }
                    }
                }
            }
        }

        if self.config.pure_literal_elimination {
            if let Simplification::Reduced { cnf: next, assigned } =
                PureLiteralElimination.simplify(&cnf)
            {
                self.stats.pure_literals += assigned.len();
                assignment.merge(&assigned);
                cnf = next;
                if let Some(node) = self.terminal(&cnf, &assignment) {
                    return node;
                }
            }
        }

        Node::Open(cnf, assignment)
    }

    fn terminal(&mut self, cnf: &Cnf, assignment: &Assignment) -> Option<Node> {
        if cnf.is_empty() {
            return Some(Node::Sat(assignment.clone()));
        }
        if cnf.has_empty_clause() {
            trace!("falsified clause");
            self.stats.conflicts += 1;
            return Some(Node::Unsat);
        }
        None
    }
}

/// Solves `cnf` with the given configuration.
#[must_use]
pub fn dpll(cnf: &Cnf, config: DpllConfig) -> SolveResult {
    Dpll::with_config(cnf.clone(), config).solve()
}
