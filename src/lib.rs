#![warn(missing_docs)]

//! # `gridwalk`
//!
//! Traversal algorithms for small puzzle inputs: digit grids such as height maps, energy levels and terrain costs,
//! and graphs of named caves given as `name1-name2` links.
//! Build a structure with a builder such as [`GridBuilder`](builder::GridBuilder) or [`CaveGraphBuilder`](builder::CaveGraphBuilder),
//! or hand raw text straight to an [`Engine`] along with the [`Policy`] to run.
//!
//! # Internals
//! A [`Grid`] is an arena of cells in an [`ndarray::Array2`]. Each cell's neighbors are computed once, when the grid is built,
//! and stored as [`Location`]s rather than references, so the mutual adjacency of cells needs no shared ownership.
//! Which cells count as neighbors is decided by an [`Adjacency`](shape::Adjacency): four orthogonal steps or eight king steps.
//!
//! A [`CaveGraph`](graph::CaveGraph) is a [`petgraph`] undirected graph, so every link is symmetric by construction.
//!
//! The four traversals are:
//! 1. Flood fill ([`flood`]): partition a height map into basins, each tied to a local minimum, with 9s as walls.
//! 2. Automaton step ([`automaton`]): increment every cell, let cells above 9 trigger and bump their neighbors in a cascade, then reset them.
//! 3. Constrained path enumeration ([`paths`]): list every route from `start` to `end` under a budget on revisiting lowercase caves.
//! 4. Shortest path ([`shortest`]): cheapest route from corner to corner of a cost map.
//!
//! All of them keep their working state on an explicit stack or heap rather than in recursion, and return their results as values;
//! the [`reduce`] module folds those results into a single [`Answer`](reduce::Answer).

pub use engine::{Config, Engine, Policy, RegionReduction, Report};
pub use error::{Error, MalformedInput};
pub use grid::Grid;
pub use location::{Dimension, Location};

pub mod automaton;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod engine;
pub(crate) mod error;
pub mod flood;
pub mod graph;
pub(crate) mod grid;
pub mod input;
pub(crate) mod location;
pub mod paths;
pub mod reduce;
pub mod shape;
pub mod shortest;
mod tests;
