//! The solution exchange format.
//!
//! A solution file is either the single token `0`, meaning the formula has
//! no satisfying assignment, or a whitespace-separated list of signed
//! variables where the sign carries the value (positive means true). There is
//! no trailing terminator.

use crate::sat::assignment::Assignment;
use crate::sat::error::SolutionError;
use crate::sat::literal::Literal;
use crate::sat::solver::SolveResult;
use std::io::{self, Write};
use std::path::Path;

/// Parsed contents of a solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionFile {
    /// The file claims the formula is unsatisfiable.
    Unsatisfiable,
    Assignment(Assignment),
}

impl From<SolveResult> for SolutionFile {
    fn from(result: SolveResult) -> Self {
        match result {
            SolveResult::Sat(model) => Self::Assignment(model),
            SolveResult::Unsat => Self::Unsatisfiable,
        }
    }
}

/// Parses the contents of a solution file.
///
/// # Errors
///
/// [`SolutionError`] if the text holds a non-integer token, has a `0`
/// anywhere but as the sole token, or assigns a variable both ways.
///
/// Empty text is the empty assignment, which is what a satisfied formula
/// with no remaining variables writes.
pub fn parse_solution(input: &str) -> Result<SolutionFile, SolutionError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    match tokens.as_slice() {
        ["0"] => Ok(SolutionFile::Unsatisfiable),
        tokens => {
            let mut assignment = Assignment::new();
            for &token in tokens {
                let value = token
                    .parse::<i32>()
                    .map_err(|_| SolutionError::InvalidValue(token.to_string()))?;
                if value == 0 {
                    return Err(SolutionError::UnexpectedZero);
                }
                let lit = Literal::try_from(value)
                    .map_err(|_| SolutionError::InvalidValue(token.to_string()))?;
                if assignment.assign_literal(lit) == Some(!lit.polarity()) {
                    return Err(SolutionError::Contradictory(lit.variable()));
                }
            }
            Ok(SolutionFile::Assignment(assignment))
        }
    }
}

/// Renders a solve result in the solution format.
#[must_use]
pub fn format_solution(result: &SolveResult) -> String {
    match result {
        SolveResult::Unsat => "0".to_string(),
        SolveResult::Sat(model) => model.to_string(),
    }
}

/// Writes `result` in the solution format.
///
/// # Errors
///
/// Any I/O error from `writer`.
pub fn write_solution<W: Write>(result: &SolveResult, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", format_solution(result))?;
    writer.flush()
}

/// Reads and parses the solution file at `path`.
///
/// # Errors
///
/// [`SolutionError::Io`] if the file cannot be read, or any error from
/// [`parse_solution`].
pub fn read_solution_file<P: AsRef<Path>>(path: P) -> Result<SolutionFile, SolutionError> {
    let content = std::fs::read_to_string(path)?;
    parse_solution(&content)
}

/// Writes `result` to the file at `path`, replacing it if it exists.
///
/// # Errors
///
/// Any I/O error creating or writing the file.
pub fn write_solution_file<P: AsRef<Path>>(result: &SolveResult, path: P) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_solution(result, io::BufWriter::new(file))
}
