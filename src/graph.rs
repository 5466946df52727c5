//! Cave graphs and the paths through them.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};

/// Whether a cave may be revisited freely.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CaveSize {
    /// Name without uppercase letters; subject to the visit budget.
    Small,
    /// Any other name; may be visited any number of times.
    Large,
}

/// A uniquely named node of a [`CaveGraph`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cave {
    pub(crate) name: String,
    pub(crate) size: CaveSize,
}

impl Cave {
    pub(crate) fn named(name: &str) -> Self {
        let size = match name.chars().any(char::is_uppercase) {
            true => CaveSize::Large,
            false => CaveSize::Small,
        };

        Self { name: name.to_string(), size }
    }

    /// The name, with its original casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// See [`CaveSize`].
    pub fn size(&self) -> CaveSize {
        self.size
    }
}

/// An undirected graph of named caves with a `start` and an `end`.
///
/// Build one with a [`CaveGraphBuilder`](crate::builder::CaveGraphBuilder); every link is symmetric and each name maps to exactly one node.
#[derive(Clone, Debug)]
pub struct CaveGraph {
    pub(crate) graph: UnGraph<Cave, ()>,
    pub(crate) names: HashMap<String, NodeIndex>,
    pub(crate) start: NodeIndex,
    pub(crate) end: NodeIndex,
}

impl CaveGraph {
    /// The `start` node.
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    /// The `end` node.
    pub fn end(&self) -> NodeIndex {
        self.end
    }

    /// Whether `node` is `start` or `end`.
    pub fn is_terminal(&self, node: NodeIndex) -> bool {
        node == self.start || node == self.end
    }

    /// Look a cave up by its exact name.
    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    /// The cave at `node`.
    ///
    /// # Panics
    /// If `node` does not belong to this graph.
    pub fn cave(&self, node: NodeIndex) -> &Cave {
        &self.graph[node]
    }

    /// Number of distinct caves.
    pub fn cave_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Caves linked to `node`, in the order they were first named.
    pub fn links(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors(node).sorted().collect_vec()
    }

    /// Render `path` as comma-separated cave names, e.g. `start,A,b,end`.
    pub fn render(&self, path: &Path) -> String {
        path.caves.iter().map(|node| self.graph[*node].name.as_str()).join(",")
    }
}

impl Display for CaveGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for node in self.graph.node_indices() {
            let links = self.links(node).into_iter().map(|other| self.graph[other].name.as_str()).join(",");
            writeln!(f, "{}: {}", self.graph[node].name, links)?;
        }

        Ok(())
    }
}

/// An ordered walk through a [`CaveGraph`] from `start` to `end`. Two paths are the same only if their cave sequences are.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Path {
    pub(crate) caves: Vec<NodeIndex>,
}

impl Path {
    /// The caves along this path, `start` first.
    pub fn caves(&self) -> &[NodeIndex] {
        &self.caves
    }
}
