//! Search configuration.

use crate::sat::verify::VerifyPolicy;

/// Switches for the optional parts of the DPLL search.
///
/// Both heuristics are correctness-preserving accelerants: turning either
/// off changes how much of the search tree is walked, never the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpllConfig {
    /// Run unit propagation to a fixpoint at every search node.
    pub unit_propagation: bool,
    /// Run one pass of pure literal elimination at every search node.
    pub pure_literal_elimination: bool,
    /// How the solver checks its own answer in [`crate::sat::solver::Solver::solve_checked`].
    pub verify_policy: VerifyPolicy,
}

impl Default for DpllConfig {
    fn default() -> Self {
        Self {
            unit_propagation: true,
            pure_literal_elimination: true,
            verify_policy: VerifyPolicy::Permissive,
        }
    }
}

impl DpllConfig {
    /// Plain backtracking with both heuristics disabled.
    #[must_use]
    pub const fn bare() -> Self {
        Self {
            unit_propagation: false,
            pure_literal_elimination: false,
            verify_policy: VerifyPolicy::Permissive,
        }
    }

    /// Returns `self` with unit propagation switched to `enabled`.
    #[must_use]
    pub const fn with_unit_propagation(mut self, enabled: bool) -> Self {
        self.unit_propagation = enabled;
        self
    }

    /// Returns `self` with pure literal elimination switched to `enabled`.
    #[must_use]
    pub const fn with_pure_literal_elimination(mut self, enabled: bool) -> Self {
        self.pure_literal_elimination = enabled;
        self
    }

    /// Returns `self` checking models under `policy`.
    #[must_use]
    pub const fn with_verify_policy(mut self, policy: VerifyPolicy) -> Self {
        self.verify_policy = policy;
        self
    }

    /// All four combinations of the two heuristic switches.
    #[must_use]
    pub fn all_heuristic_combinations() -> [Self; 4] {
        [
            Self::default(),
            Self::default().with_pure_literal_elimination(false),
            Self::default().with_unit_propagation(false),
            Self::bare(),
        ]
    }
}
