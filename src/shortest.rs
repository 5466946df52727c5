//! Cheapest corner-to-corner routes over cost maps.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ndarray::{s, Array2, ArrayView1};
use tracing::debug;

use crate::grid::Grid;
use crate::location::Location;

/// Cost of the cheaper of the two routes hugging the border from the top left to the bottom right corner:
/// along the top row then down the right column, or down the left column then along the bottom row.
///
/// Entering a cell costs its value; the starting cell is free. Either route is a real path, so this bounds the true minimum from above.
pub fn perimeter_bound(grid: &Grid) -> u64 {
    let values = grid.values();
    let last_row = grid.breadth() - 1;
    let last_col = grid.width() - 1;

    let across_then_down = sum(values.row(0).slice(s![1..])) + sum(values.column(last_col).slice(s![1..]));
    let down_then_across = sum(values.column(0).slice(s![1..])) + sum(values.row(last_row).slice(s![1..]));

    across_then_down.min(down_then_across)
}

fn sum(cells: ArrayView1<u32>) -> u64 {
    cells.iter().map(|v| *v as u64).sum()
}

/// Minimum total cost of a path from the top left to the bottom right corner of `grid`, moving along its adjacency.
///
/// The cost of a path is the sum of the values of the cells it enters; the starting cell is not counted.
/// This is a best-first search over a binary heap, seeded with [`perimeter_bound`] so that no partial path costing more than
/// a known complete route is ever queued.
/// Returns [`None`] if the corner cannot be reached.
pub fn shortest_path(grid: &Grid) -> Option<u64> {
    let bound = perimeter_bound(grid);
    let cost = search(grid, Location(0, 0), grid.max_loc(), bound);

    debug!(bound, ?cost, "shortest path search finished");
    cost
}

fn search(grid: &Grid, from: Location, to: Location, bound: u64) -> Option<u64> {
    let mut best = Array2::from_elem(grid.cells.raw_dim(), u64::MAX);
    let mut frontier = BinaryHeap::new();

    best[from.as_index()] = 0;
    frontier.push(Reverse((0u64, from)));

    while let Some(Reverse((cost, here))) = frontier.pop() {
        if here == to {
            return Some(cost);
        }
        // stale entry; a cheaper one for this cell was already expanded
        if cost > best[here.as_index()] {
            continue;
        }

        for neighbor in grid.neighbors(here) {
            let next = cost + grid.cells[neighbor.as_index()].value as u64;
            if next > bound || next >= best[neighbor.as_index()] {
                continue;
            }

            best[neighbor.as_index()] = next;
            frontier.push(Reverse((next, *neighbor)));
        }
    }

    None
}
