//! Enumeration of start-to-end paths under a visit budget.

use petgraph::graph::NodeIndex;
use strum::{Display, EnumString};
use tracing::debug;

use crate::error::Error;
use crate::graph::{CaveGraph, CaveSize, Path};

/// How many times a [small](CaveSize::Small) cave may appear in one path.
///
/// Large caves are never limited, and `start` is never re-entered under any budget.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum VisitBudget {
    /// No limit on small caves either. Enumeration only finishes if no cycle is reachable from `start`.
    Unrestricted,
    /// Each small cave at most once.
    #[default]
    AtMostOnce,
    /// Each small cave at most once, except that a single small cave other than `start` and `end` may appear twice.
    OneDoubleVisit,
}

impl VisitBudget {
    /// Whether `frame` may be extended to `next`; if so, whether the extended frame has spent its double visit.
    fn admit(&self, graph: &CaveGraph, frame: &Frame, next: NodeIndex) -> Option<bool> {
        if next == graph.start() {
            return None;
        }
        if *self == Self::Unrestricted || graph.cave(next).size() == CaveSize::Large || !frame.path.contains(&next) {
            return Some(frame.double_spent);
        }

        match self {
            Self::OneDoubleVisit if !frame.double_spent && !graph.is_terminal(next) => Some(true),
            _ => None,
        }
    }
}

// a partial path still to be extended
struct Frame {
    path: Vec<NodeIndex>,
    double_spent: bool,
}

/// Enumerate every path from `start` to `end` that `budget` allows, in depth-first order with links taken in the order caves were first named.
///
/// Every branch is explored; nothing is cached, since the paths themselves are the result.
/// A path stops at its first arrival at `end`. No path at all is a valid, empty result.
/// Fails with [`Error::IterationLimitExceeded`] once more than `ceiling` partial paths have been expanded.
pub fn enumerate_paths(graph: &CaveGraph, budget: VisitBudget, ceiling: usize) -> Result<Vec<Path>, Error> {
    let mut stack = vec![Frame { path: vec![graph.start()], double_spent: false }];
    let mut paths = Vec::new();
    let mut expanded = 0;

    while let Some(frame) = stack.pop() {
        expanded += 1;
        if expanded > ceiling {
            return Err(Error::IterationLimitExceeded { limit: ceiling });
        }

        let here = match frame.path.last() {
            Some(here) => *here,
            None => continue,
        };
        if here == graph.end() {
            paths.push(Path { caves: frame.path });
            continue;
        }

        // reversed so the earliest-named link is explored first
        for next in graph.links(here).into_iter().rev() {
            if let Some(double_spent) = budget.admit(graph, &frame, next) {
                let mut path = Vec::with_capacity(frame.path.len() + 1);
                path.extend_from_slice(&frame.path);
                path.push(next);
                stack.push(Frame { path, double_spent });
            }
        }
    }

    debug!(%budget, paths = paths.len(), expanded, "path enumeration finished");
    Ok(paths)
}
