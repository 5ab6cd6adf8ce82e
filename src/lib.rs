//! This crate provides a DPLL solver for the Boolean satisfiability problem,
//! together with DIMACS and solution file handling and a few problem
//! generators.

/// The `sat` module holds the formula types, the DPLL solver, its
/// simplification steps and the verifier, plus DIMACS and solution file I/O.
pub mod sat;

/// The `generator` module produces formulas to solve: random instances with a
/// planted solution, and graph colouring reductions.
pub mod generator;
