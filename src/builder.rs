//! Line-at-a-time builders for grids and cave graphs.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graph::UnGraph;
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::error::{Error, MalformedInput};
use crate::graph::{Cave, CaveGraph};
use crate::grid::Grid;
use crate::shape::Adjacency;

/// Functionality all builders must implement: take raw input one line at a time, then produce a structure.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once a line is rejected the builder is invalid, and further lines are ignored.
pub trait Builder: Clone {
    /// The structure this builder produces.
    type Output;
    /// Feed one line of input.
    ///
    /// May cause the builder to enter an invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    fn push_line(&mut self, line: &str) -> &mut Self;
    /// Shorthand for multiple calls to [`Self::push_line`], with the same conditions.
    fn push_lines<'a>(&mut self, lines: impl IntoIterator<Item=&'a str>) -> &mut Self {
        for line in lines {
            self.push_line(line);
        }

        self
    }
    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<MalformedInput>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<MalformedInput>>;
    /// Convert the state of this builder into [`Self::Output`].
    fn build(&self) -> Result<Self::Output, Error>;
}

/// A builder for [`Grid`]s whose cells are single decimal digits, one row per line.
#[derive(Clone, Debug, Default)]
pub struct GridBuilder {
    adjacency: Adjacency,
    rows: Vec<Vec<u32>>,
    invalid_reasons: Vec<MalformedInput>,
}

impl GridBuilder {
    /// Construct an empty builder whose grid will use `adjacency`.
    pub fn with_adjacency(adjacency: Adjacency) -> Self {
        Self {
            adjacency,
            ..Default::default()
        }
    }

    /// Add one row of digits.
    ///
    /// May cause the builder to enter an invalid state if the row is empty, contains a non-digit, or differs in length from the first row.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn push_row(&mut self, row: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let row_index = self.rows.len();
        if row.is_empty() {
            self.invalid_reasons.push(MalformedInput::EmptyRow { row: row_index });
            return self;
        }

        let mut values = Vec::with_capacity(row.len());
        for (col, found) in row.chars().enumerate() {
            match found.to_digit(10) {
                Some(value) => values.push(value),
                None => {
                    self.invalid_reasons.push(MalformedInput::NotADigit { row: row_index, col, found });
                    return self;
                }
            }
        }

        if let Some(first) = self.rows.first() {
            if first.len() != values.len() {
                self.invalid_reasons.push(MalformedInput::RaggedRow { row: row_index, expected: first.len(), found: values.len() });
                return self;
            }
        }

        self.rows.push(values);
        self
    }
}

impl Builder for GridBuilder {
    type Output = Grid;

    fn push_line(&mut self, line: &str) -> &mut Self {
        self.push_row(line)
    }

    fn is_valid(&self) -> Option<&Vec<MalformedInput>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build(&self) -> Result<Grid, Error> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone().into());
        }

        let breadth = self.rows.len();
        let width = self.rows.first().map_or(0, Vec::len);
        let values = Array2::from_shape_fn((breadth, width), |(row, col)| self.rows[row][col]);
        let grid = Grid::from_values(values, self.adjacency).ok_or(MalformedInput::NoRows)?;

        debug!(width = grid.width(), breadth = grid.breadth(), adjacency = %self.adjacency, "built grid");
        Ok(grid)
    }
}

/// A builder for [`CaveGraph`]s from lines of the form `name1-name2`.
#[derive(Clone, Debug, Default)]
pub struct CaveGraphBuilder {
    // caves in the order they were first named
    names: Vec<String>,
    // links, deduplicated regardless of direction
    links: Vec<UnorderedPair<String>>,
    seen_links: HashSet<UnorderedPair<String>>,
    invalid_reasons: Vec<MalformedInput>,
}

impl CaveGraphBuilder {
    /// Link the two named caves, creating either one if this is the first time it is named.
    ///
    /// Linking two caves a second time, in either order, has no further effect.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_link(&mut self, a: &str, b: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for name in [a, b] {
            if !self.names.iter().any(|known| known == name) {
                self.names.push(name.to_string());
            }
        }

        let link = UnorderedPair::from((a.to_string(), b.to_string()));
        if self.seen_links.insert(link.clone()) {
            self.links.push(link);
        }

        self
    }
}

impl Builder for CaveGraphBuilder {
    type Output = CaveGraph;

    /// Parse `name1-name2` and [link](Self::add_link) the two caves.
    ///
    /// May cause the builder to enter an invalid state if the line is not exactly two non-empty names joined by `-`.
    fn push_line(&mut self, line: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match line.split('-').collect_tuple() {
            Some((a, b)) if !a.is_empty() && !b.is_empty() => self.add_link(a, b),
            _ => {
                self.invalid_reasons.push(MalformedInput::BadEdge { line: line.to_string() });
                self
            }
        }
    }

    fn is_valid(&self) -> Option<&Vec<MalformedInput>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build(&self) -> Result<CaveGraph, Error> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone().into());
        }

        let mut graph = UnGraph::with_capacity(self.names.len(), self.links.len());
        let names: HashMap<String, _> = self.names.iter()
            .map(|name| (name.clone(), graph.add_node(Cave::named(name))))
            .collect();

        for UnorderedPair(a, b) in self.links.iter() {
            graph.update_edge(names[a], names[b], ());
        }

        let start = *names.get("start").ok_or(Error::MissingTerminal("start"))?;
        let end = *names.get("end").ok_or(Error::MissingTerminal("end"))?;

        debug!(caves = graph.node_count(), links = graph.edge_count(), "built cave graph");
        Ok(CaveGraph { graph, names, start, end })
    }
}
