//! Error types for the solver and its exchange formats.

use crate::sat::literal::Variable;
use thiserror::Error;

/// Invalid literal data handed to the formula model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Zero terminates clauses in DIMACS and is never a literal.
    #[error("0 is not a valid literal")]
    ZeroLiteral,

    #[error("literal {0} is out of range")]
    LiteralOutOfRange(i32),
}

/// Malformed DIMACS input.
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("line {line}: failed to parse literal '{token}'")]
    InvalidLiteral { line: usize, token: String },

    #[error("line {line}: clause is not terminated by 0")]
    MissingTerminator { line: usize },

    #[error("line {line}: {source}")]
    Formula {
        line: usize,
        #[source]
        source: FormulaError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed solution file.
#[derive(Debug, Error)]
pub enum SolutionError {
    #[error("failed to parse solution value '{0}'")]
    InvalidValue(String),

    /// `0` is only valid as the sole token of an unsatisfiable solution.
    #[error("unexpected 0 in assignment list")]
    UnexpectedZero,

    #[error("variable {0} is assigned both true and false")]
    Contradictory(Variable),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised by the strict verification policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("variable {0} has no value in the assignment")]
    Unassigned(Variable),
}

/// Failures of a full solve-and-check run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The search reported a model that does not satisfy the formula.
    /// This is a defect in the solver, never a property of the input.
    #[error("solver returned an assignment that does not satisfy the formula")]
    VerificationFailed,

    #[error(transparent)]
    Verify(#[from] VerifyError),
}
