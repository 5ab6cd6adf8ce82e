//! Random formulas with a planted solution.
//!
//! A hidden assignment is drawn first, and every clause is built around one
//! literal of it, so every generated formula is satisfiable. The remaining
//! literals of each clause are uniform over variables and polarities.

use crate::generator::GeneratorError;
use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;

/// Parameters for [`RandomCnf::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomCnf {
    pub num_vars: u32,
    pub num_clauses: usize,
    /// Upper bound on clause width. Clauses can be shorter when the same
    /// literal is drawn twice.
    pub max_clause_len: usize,
    /// Fixes the random stream. `None` seeds from the environment.
    pub seed: Option<u64>,
}

impl RandomCnf {
    #[must_use]
    pub const fn new(num_vars: u32, num_clauses: usize, max_clause_len: usize) -> Self {
        Self {
            num_vars,
            num_clauses,
            max_clause_len,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the parameters without generating anything.
    ///
    /// # Errors
    ///
    /// As for [`RandomCnf::generate`].
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_vars == 0 {
            return Err(GeneratorError::NoVariables);
        }
        if self.max_clause_len == 0 {
            return Err(GeneratorError::ZeroClauseLength);
        }
        if i32::try_from(self.num_vars).is_err() {
            return Err(GeneratorError::TooManyVariables(self.num_vars));
        }
        Ok(())
    }

    /// Generates a formula.
    ///
    /// # Errors
    ///
    /// [`GeneratorError`] if there are no variables, the clause length is
    /// zero, or the variables do not fit in an `i32`.
    pub fn generate(&self) -> Result<Cnf, GeneratorError> {
        self.generate_with_solution().map(|(cnf, _)| cnf)
    }

    /// Generates a formula together with the planted assignment it was built
    /// around.
    ///
    /// # Errors
    ///
    /// As for [`RandomCnf::generate`].
    pub fn generate_with_solution(&self) -> Result<(Cnf, Assignment), GeneratorError> {
        self.validate()?;

        let mut rng = self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        let mut planted: Vec<Literal> = (1..=self.num_vars)
            .map(|var| Literal::new(var, rng.bool()))
            .collect();
        rng.shuffle(&mut planted);

        let clauses = (0..self.num_clauses)
            .map(|i| {
                let anchor = planted[i % planted.len()];
                let extra = if self.max_clause_len > 1 {
                    rng.usize(1..self.max_clause_len)
                } else {
                    0
                };
                let others: Vec<Literal> = (0..extra)
                    .map(|_| Literal::new(rng.u32(1..=self.num_vars), rng.bool()))
                    .collect();
                Clause::from_literals(std::iter::once(anchor).chain(others))
            })
            .collect();

        Ok((Cnf::from_clauses(clauses), planted.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::verify::{VerifyPolicy, verify};

    #[test]
    fn test_shape() {
        let cnf = RandomCnf::new(10, 40, 4).with_seed(7).generate().unwrap();
        assert_eq!(cnf.len(), 40);
        assert!(cnf.num_vars <= 10);
        assert!(cnf.iter().all(|c| (1..=4).contains(&c.len())));
    }

    #[test]
    fn test_planted_solution_satisfies() {
        for seed in 0..20 {
            let (cnf, planted) = RandomCnf::new(8, 30, 3)
                .with_seed(seed)
                .generate_with_solution()
                .unwrap();
            assert_eq!(planted.len(), 8);
            assert_eq!(verify(&cnf, &planted, VerifyPolicy::Strict), Ok(true));
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let params = RandomCnf::new(12, 50, 5).with_seed(42);
        assert_eq!(params.generate().unwrap(), params.generate().unwrap());
    }

    #[test]
    fn test_unit_width() {
        let cnf = RandomCnf::new(5, 5, 1).with_seed(3).generate().unwrap();
        assert_eq!(cnf.len(), 5);
        assert!(cnf.iter().all(|c| c.is_unit()));
        assert_eq!(cnf.variables().len(), 5);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            RandomCnf::new(0, 5, 3).generate(),
            Err(GeneratorError::NoVariables)
        );
        assert_eq!(
            RandomCnf::new(3, 5, 0).generate(),
            Err(GeneratorError::ZeroClauseLength)
        );
        assert_eq!(
            RandomCnf::new(u32::MAX, 1, 1).generate(),
            Err(GeneratorError::TooManyVariables(u32::MAX))
        );
    }
}
