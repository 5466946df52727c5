//! Synchronous cascade simulation over a grid of energy levels.

use tracing::{debug, trace};

use crate::error::Error;
use crate::grid::Grid;
use crate::location::Location;

/// Energy above which a cell triggers.
pub const THRESHOLD: u32 = 9;

/// When an [`Automaton`] run stops.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Termination {
    /// Run exactly this many ticks and report the total number of triggers.
    Ticks(usize),
    /// Run until every cell triggers in the same tick and report that tick.
    UntilSynchronized,
}

/// A synchronous cascade simulation over a [`Grid`] of energy levels.
///
/// The only way to advance is [`Self::tick`], which takes `&mut self`; the grid is therefore never observed mid-cascade.
#[derive(Clone, Debug)]
pub struct Automaton {
    grid: Grid,
    ticks: usize,
    triggers: u64,
}

impl Automaton {
    /// Start a simulation from the energies in `grid`.
    pub fn new(grid: Grid) -> Self {
        Self { grid, ticks: 0, triggers: 0 }
    }

    /// The grid as of the last completed tick.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Triggers accumulated over every completed tick.
    pub fn triggers(&self) -> u64 {
        self.triggers
    }

    /// Advance one tick, returning how many cells triggered during it.
    ///
    /// Every energy goes up by one. Every cell above [`THRESHOLD`] then triggers once, bumping all of its neighbors,
    /// which may push them over the threshold in turn; a work-list carries the cascade until it settles.
    /// Finally every triggered cell drops back to zero.
    pub fn tick(&mut self) -> usize {
        let cells = &mut self.grid.cells;
        let mut pending: Vec<Location> = Vec::new();

        for (ind, cell) in cells.indexed_iter_mut() {
            cell.value += 1;
            if cell.value > THRESHOLD {
                pending.push(Location::from(ind));
            }
        }

        let mut triggered = Vec::with_capacity(pending.len());
        while let Some(here) = pending.pop() {
            if cells[here.as_index()].triggered {
                continue;
            }
            cells[here.as_index()].triggered = true;
            triggered.push(here);

            for i in 0..cells[here.as_index()].neighbors.len() {
                let neighbor = cells[here.as_index()].neighbors[i];
                let other = &mut cells[neighbor.as_index()];
                other.value += 1;
                if other.value > THRESHOLD && !other.triggered {
                    pending.push(neighbor);
                }
            }
        }

        for here in &triggered {
            let cell = &mut cells[here.as_index()];
            cell.value = 0;
            cell.triggered = false;
        }

        self.ticks += 1;
        self.triggers += triggered.len() as u64;
        trace!(tick = self.ticks, triggered = triggered.len(), "tick");
        triggered.len()
    }

    /// Run `ticks` ticks, calling `observe` after each, and return the triggers they accumulated.
    pub fn run_ticks(&mut self, ticks: usize, mut observe: impl FnMut(&Self)) -> u64 {
        let before = self.triggers;
        for _ in 0..ticks {
            self.tick();
            observe(self);
        }

        debug!(ticks, triggers = self.triggers - before, "fixed tick run finished");
        self.triggers - before
    }

    /// Tick until every cell triggers in the same tick, calling `observe` after each, and return that tick's number (counting from 1).
    ///
    /// Gives up with [`Error::NoSynchronization`] after `ceiling` ticks.
    pub fn run_until_synchronized(&mut self, ceiling: usize, mut observe: impl FnMut(&Self)) -> Result<usize, Error> {
        let population = self.grid.cells.len();
        for _ in 0..ceiling {
            let triggered = self.tick();
            observe(self);
            if triggered == population {
                debug!(tick = self.ticks, "synchronized");
                return Ok(self.ticks);
            }
        }

        Err(Error::NoSynchronization { ticks: ceiling })
    }
}
