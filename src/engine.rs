use itertools::Itertools;
use tracing::debug;

use crate::automaton::{Automaton, Termination};
use crate::builder::{Builder, CaveGraphBuilder, GridBuilder};
use crate::error::Error;
use crate::flood::{flood_fill, BARRIER};
use crate::grid::Grid;
use crate::input;
use crate::location::Dimension;
use crate::paths::{enumerate_paths, VisitBudget};
use crate::reduce::{largest_product, path_count, risk_sum, Answer};
use crate::shape::Adjacency;
use crate::shortest::{perimeter_bound, shortest_path};

/// How a flood fill's regions are folded into an answer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegionReduction {
    /// Sum of each region's minimum value plus one.
    RiskSum,
    /// Product of the three largest region sizes.
    LargestProduct,
}

/// The traversal to run, and how to reduce its output. Exactly one per [`Engine::run`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Policy {
    /// Label basins of a height map; see [`flood_fill`](crate::flood::flood_fill).
    FloodFill {
        /// How the regions become an answer.
        reduction: RegionReduction,
    },
    /// Simulate cascading energy levels; see [`Automaton`].
    AutomatonStep {
        /// When to stop ticking.
        termination: Termination,
    },
    /// Count start-to-end paths through a cave graph; see [`enumerate_paths`](crate::paths::enumerate_paths).
    ConstrainedPathEnumeration {
        /// Revisits allowed per small cave.
        budget: VisitBudget,
    },
    /// Find the cheapest route across a cost map, first expanded into `tiles` by `tiles` copies; see [`shortest_path`](crate::shortest::shortest_path).
    ShortestPath {
        /// Copies of the map along each side; 1 leaves it as is.
        tiles: Dimension,
    },
}

impl Policy {
    /// The adjacency grids are built with when [`Config::adjacency`] does not say otherwise.
    pub fn default_adjacency(&self) -> Adjacency {
        match self {
            Self::AutomatonStep { .. } => Adjacency::Diagonal,
            _ => Adjacency::Orthogonal,
        }
    }
}

/// Caller-supplied settings for an [`Engine`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Adjacency for grid policies; [`None`] uses [`Policy::default_adjacency`].
    pub adjacency: Option<Adjacency>,
    /// Most ticks an automaton may run while waiting to synchronize.
    pub tick_ceiling: usize,
    /// Most partial paths an enumeration may expand.
    pub enumeration_ceiling: usize,
    /// Whether to collect diagnostic snapshots. Never changes the answer.
    pub show_intermediate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adjacency: None,
            tick_ceiling: 10_000,
            enumeration_ceiling: 10_000_000,
            show_intermediate: false,
        }
    }
}

/// What a run produced: the answer, preceded by any snapshots taken along the way.
#[derive(Clone, Debug)]
pub struct Report {
    pub(crate) snapshots: Vec<String>,
    pub(crate) answer: Answer,
}

impl Report {
    /// Diagnostic renderings in the order they were taken. Empty unless [`Config::show_intermediate`] is set.
    pub fn snapshots(&self) -> &[String] {
        &self.snapshots
    }

    /// The final answer.
    pub fn answer(&self) -> &Answer {
        &self.answer
    }
}

// renders lazily so a run without snapshots does no formatting
struct Snapshots {
    enabled: bool,
    taken: Vec<String>,
}

impl Snapshots {
    fn take(&mut self, render: impl FnOnce() -> String) {
        if self.enabled {
            self.taken.push(render());
        }
    }
}

/// Runs one [`Policy`] over raw puzzle input.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: Config,
}

impl Engine {
    /// An engine using `config`.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The settings this engine runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse `raw` into the structure `policy` needs, traverse it, and reduce the result to an [`Answer`].
    ///
    /// `raw` must be a single block of lines: digit rows for the grid policies, `name1-name2` links for path enumeration.
    pub fn run(&self, policy: Policy, raw: &str) -> Result<Report, Error> {
        debug!(?policy, config = ?self.config, "running");
        let lines = input::lines(raw)?;
        let mut snapshots = Snapshots { enabled: self.config.show_intermediate, taken: Vec::new() };

        let answer = match policy {
            Policy::FloodFill { reduction } => {
                let grid = self.grid(&policy, &lines)?;
                snapshots.take(|| grid.to_string());

                let map = flood_fill(&grid, |value| value == BARRIER);
                snapshots.take(|| map.to_string());
                snapshots.take(|| map.regions().iter().join("\n"));

                match reduction {
                    RegionReduction::RiskSum => Answer::new("Sum of risk levels", risk_sum(map.regions())),
                    RegionReduction::LargestProduct => Answer::new("Product of largest basins", largest_product(map.regions(), 3)),
                }
            }
            Policy::AutomatonStep { termination } => {
                let grid = self.grid(&policy, &lines)?;
                snapshots.take(|| grid.to_string());

                let mut automaton = Automaton::new(grid);
                let observe = |automaton: &Automaton| snapshots.take(|| format!("after tick {}:\n{}", automaton.ticks(), automaton.grid()));
                match termination {
                    Termination::Ticks(ticks) => Answer::new("Total triggers", automaton.run_ticks(ticks, observe)),
                    Termination::UntilSynchronized => {
                        let tick = automaton.run_until_synchronized(self.config.tick_ceiling, observe)?;
                        Answer::new("First synchronized tick", tick as u64)
                    }
                }
            }
            Policy::ConstrainedPathEnumeration { budget } => {
                let graph = CaveGraphBuilder::default().push_lines(lines.iter().copied()).build()?;
                snapshots.take(|| graph.to_string());

                let paths = enumerate_paths(&graph, budget, self.config.enumeration_ceiling)?;
                snapshots.take(|| paths.iter().map(|path| graph.render(path)).join("\n"));

                Answer::new("Number of paths", path_count(&paths))
            }
            Policy::ShortestPath { tiles } => {
                let grid = self.grid(&policy, &lines)?;
                let grid = match tiles.get() {
                    1 => grid,
                    _ => grid.tiled(tiles),
                };
                snapshots.take(|| grid.to_string());
                snapshots.take(|| format!("perimeter bound: {}", perimeter_bound(&grid)));

                Answer {
                    label: "Lowest total cost",
                    value: shortest_path(&grid),
                }
            }
        };

        debug!(%answer, "run finished");
        Ok(Report { snapshots: snapshots.taken, answer })
    }

    fn grid(&self, policy: &Policy, lines: &[&str]) -> Result<Grid, Error> {
        let adjacency = self.config.adjacency.unwrap_or_else(|| policy.default_adjacency());
        GridBuilder::with_adjacency(adjacency).push_lines(lines.iter().copied()).build()
    }
}
