//! Reduction of graph k-colouring to CNF.
//!
//! Vertex `v` having colour `c` (both numbered from 1) is the variable
//! `(v - 1) * k + c`. The formula has one "at least one colour" clause per
//! vertex and, for every edge and every colour, one clause forbidding both
//! endpoints from taking that colour. A vertex may end up with several
//! colours in a model; any one of them gives a proper colouring.

use crate::generator::GraphError;
use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// An undirected graph on vertices `1..=num_vertices`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    num_vertices: u32,
    edges: Vec<(u32, u32)>,
}

impl Graph {
    /// Builds a graph, checking every edge.
    ///
    /// # Errors
    ///
    /// [`GraphError`] for a zero vertex, a vertex above `num_vertices`, or a
    /// self-loop.
    pub fn new(num_vertices: u32, edges: Vec<(u32, u32)>) -> Result<Self, GraphError> {
        for &(u, w) in &edges {
            if u == 0 || w == 0 {
                return Err(GraphError::ZeroVertex);
            }
            if u > num_vertices || w > num_vertices {
                return Err(GraphError::UnknownVertex(u, w, num_vertices));
            }
            if u == w {
                return Err(GraphError::SelfLoop(u));
            }
        }
        Ok(Self {
            num_vertices,
            edges,
        })
    }

    /// The complete graph on `n` vertices.
    #[must_use]
    pub fn complete(n: u32) -> Self {
        let edges = (1..=n)
            .flat_map(|u| (u + 1..=n).map(move |w| (u, w)))
            .collect();
        Self {
            num_vertices: n,
            edges,
        }
    }

    #[must_use]
    pub const fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    #[must_use]
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    fn check_size(&self, k: u32) -> Result<(), GraphError> {
        if k == 0 {
            return Err(GraphError::NoColours);
        }
        let fits = self
            .num_vertices
            .checked_mul(k)
            .and_then(|n| i32::try_from(n).ok())
            .is_some();
        if fits {
            Ok(())
        } else {
            Err(GraphError::TooLarge {
                vertices: self.num_vertices,
                colours: k,
            })
        }
    }

    /// Encodes "this graph has a proper colouring with `k` colours".
    ///
    /// # Errors
    ///
    /// [`GraphError::NoColours`] if `k` is zero, or
    /// [`GraphError::TooLarge`] if the variables would overflow an `i32`.
    pub fn k_colouring_cnf(&self, k: u32) -> Result<Cnf, GraphError> {
        self.check_size(k)?;

        let at_least_one = (1..=self.num_vertices).map(|v| {
            (1..=k)
                .map(|c| Literal::new(colour_variable(v, c, k), true))
                .collect::<Clause>()
        });

        let no_shared_colour = self.edges.iter().flat_map(|&(u, w)| {
            (1..=k).map(move |c| {
                Clause::from_literals([
                    Literal::new(colour_variable(u, c, k), false),
                    Literal::new(colour_variable(w, c, k), false),
                ])
            })
        });

        Ok(at_least_one.chain(no_shared_colour).collect())
    }

    /// Reads a colouring off a model of [`Graph::k_colouring_cnf`].
    ///
    /// Each vertex gets the lowest colour assigned true, or `None` if the
    /// model gives it no colour.
    #[must_use]
    pub fn decode(&self, model: &Assignment, k: u32) -> Vec<Option<u32>> {
        (1..=self.num_vertices)
            .map(|v| (1..=k).find(|&c| model.value(colour_variable(v, c, k)) == Some(true)))
            .collect()
    }

    /// Whether `colours` (indexed from vertex 1) gives every vertex a colour
    /// and no edge the same colour at both ends.
    #[must_use]
    pub fn is_proper(&self, colours: &[Option<u32>]) -> bool {
        colours.len() == self.num_vertices as usize
            && colours.iter().all(Option::is_some)
            && self
                .edges
                .iter()
                .all(|&(u, w)| colours[u as usize - 1] != colours[w as usize - 1])
    }
}

/// The variable for "vertex `v` has colour `c`" among `k` colours.
#[must_use]
pub const fn colour_variable(v: u32, c: u32, k: u32) -> u32 {
    (v - 1) * k + c
}

/// Parses an edge list.
///
/// Each non-comment line is `u w`, an edge between two vertices. A line
/// `v n` declares vertices `1..=n`, which allows isolated vertices; without
/// it the largest endpoint sets the count. Lines starting with `c` are
/// comments.
///
/// # Errors
///
/// [`GraphError::Malformed`] for an unreadable line, plus anything
/// [`Graph::new`] rejects.
pub fn parse_graph(input: &str) -> Result<Graph, GraphError> {
    let mut declared = 0;
    let mut edges = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let malformed = |message: &str| GraphError::Malformed {
            line: line_no,
            message: message.to_string(),
        };
        let number = |token: &str| {
            token
                .parse::<u32>()
                .map_err(|_| malformed(&format!("'{token}' is not a vertex number")))
        };

        match tokens.as_slice() {
            [] => {}
            [first, ..] if first.starts_with('c') => {}
            ["v", n] => declared = declared.max(number(n)?),
            [u, w] => edges.push((number(u)?, number(w)?)),
            _ => return Err(malformed("expected 'u w' or 'v n'")),
        }
    }

    let largest = edges.iter().map(|&(u, w)| u.max(w)).max().unwrap_or(0);
    Graph::new(declared.max(largest), edges)
}

/// Reads and parses the edge list at `path`.
///
/// # Errors
///
/// [`GraphError::Malformed`] if the file cannot be read, or anything
/// [`parse_graph`] rejects.
pub fn read_graph_file<P: AsRef<Path>>(path: P) -> Result<Graph, GraphError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| GraphError::Malformed {
        line: 0,
        message: format!("cannot read {}: {e}", path.display()),
    })?;
    parse_graph(&content)
}

impl Display for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "v {}", self.num_vertices)?;
        for (u, w) in &self.edges {
            writeln!(f, "{u} {w}")?;
        }
        Ok(())
    }
}
