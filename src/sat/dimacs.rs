#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A reader and writer for the DIMACS CNF file format.
//!
//! The format this module accepts:
//! - Comment lines starting with 'c'.
//! - A problem line starting with 'p'. Its declared counts are not trusted;
//!   the formula is sized from the clauses actually present.
//! - Clause lines of whitespace-separated signed integers, each clause
//!   terminated by a '0' that is not itself a literal. A line may carry more
//!   than one clause.
//! - An optional '%' line marking end-of-data, as in competition benchmarks.
//!
//! Malformed input is reported as a [`DimacsError`] carrying the 1-based line
//! number; the solver never runs on a partially parsed formula.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::DimacsError;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Parses DIMACS formatted data from a `BufRead` source into a `Cnf`.
///
/// # Errors
///
/// - [`DimacsError::InvalidLiteral`] for a token that is not an `i32`.
/// - [`DimacsError::MissingTerminator`] for literals after the last `0` on a line.
/// - [`DimacsError::Io`] if reading fails.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut clauses = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek().copied() {
            Some("%") => break,
            None => {}
            Some(first) if first.starts_with('c') || first.starts_with('p') => {}
            Some(_) => parse_clause_line(parts, line_no, &mut clauses)?,
        }
    }

    Ok(Cnf::from_clauses(clauses))
}

fn parse_clause_line<'a, I: Iterator<Item = &'a str>>(
    tokens: I,
    line: usize,
    clauses: &mut Vec<Clause>,
) -> Result<(), DimacsError> {
    let mut pending: Vec<i32> = Vec::new();

    for token in tokens {
        let value = token
            .parse::<i32>()
            .map_err(|_| DimacsError::InvalidLiteral {
                line,
                token: token.to_string(),
            })?;

        if value == 0 {
            let clause = Clause::try_new(pending.drain(..))
                .map_err(|source| DimacsError::Formula { line, source })?;
            clauses.push(clause);
        } else {
            pending.push(value);
        }
    }

    if pending.is_empty() {
        Ok(())
    } else {
        Err(DimacsError::MissingTerminator { line })
    }
}

/// Parses a DIMACS formula held in a string.
///
/// # Errors
///
/// As for [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf, DimacsError> {
    parse_dimacs(input.as_bytes())
}

/// Parses the DIMACS file at `file_path`.
///
/// # Errors
///
/// [`DimacsError::Io`] if the file cannot be opened, or any error from
/// [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Writes `cnf` in DIMACS form, preceded by one `c` line per comment.
///
/// # Errors
///
/// Any I/O error from `writer`.
pub fn write_dimacs<W: Write>(cnf: &Cnf, comments: &[String], mut writer: W) -> io::Result<()> {
    for comment in comments {
        if comment.is_empty() {
            writeln!(writer, "c")?;
        } else {
            writeln!(writer, "c {comment}")?;
        }
    }
    write!(writer, "{cnf}")?;
    writer.flush()
}

/// Writes `cnf` to the file at `path`, replacing it if it exists.
///
/// # Errors
///
/// Any I/O error creating or writing the file.
pub fn write_file<P: AsRef<Path>>(cnf: &Cnf, comments: &[String], path: P) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_dimacs(cnf, comments, io::BufWriter::new(file))
}
