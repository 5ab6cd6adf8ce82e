//! Problem generators that produce [`Cnf`](crate::sat::cnf::Cnf) instances.
//!
//! The solver does not depend on these; they exist to feed it test and
//! benchmark formulas.

pub mod colouring;
pub mod random;

use thiserror::Error;

/// Invalid parameters for the random generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("the number of variables must be at least 1")]
    NoVariables,

    #[error("the maximum clause length must be at least 1")]
    ZeroClauseLength,

    #[error("{0} variables cannot be encoded as 32-bit literals")]
    TooManyVariables(u32),
}

/// Invalid graph or colouring parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("the number of colours must be at least 1")]
    NoColours,

    #[error("vertices are numbered from 1, found 0")]
    ZeroVertex,

    #[error("edge ({0}, {1}) refers to a vertex outside 1..={2}")]
    UnknownVertex(u32, u32, u32),

    #[error("self-loop on vertex {0} can never be coloured")]
    SelfLoop(u32),

    #[error("{vertices} vertices with {colours} colours do not fit in 32-bit literals")]
    TooLarge { vertices: u32, colours: u32 },

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}
