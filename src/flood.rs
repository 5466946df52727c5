//! Basin labeling of height maps.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use tracing::debug;

use crate::grid::Grid;
use crate::location::Location;

/// Identifies a region; ids are handed out in discovery order starting from 0.
pub type RegionId = usize;

/// Value of the cells that belong to no region in the basin puzzles.
pub const BARRIER: u32 = 9;

/// A connected set of non-barrier cells draining to one local minimum.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    pub(crate) id: RegionId,
    pub(crate) minimum: Location,
    pub(crate) minimum_value: u32,
    pub(crate) size: usize,
}

impl Region {
    /// This region's id.
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The cell this region is tied to.
    pub fn minimum(&self) -> Location {
        self.minimum
    }

    /// The value at [`Self::minimum`].
    pub fn minimum_value(&self) -> u32 {
        self.minimum_value
    }

    /// Number of cells in this region.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "region {}: minimum {} (value {}), size {}", self.id, self.minimum, self.minimum_value, self.size)
    }
}

/// The outcome of a flood fill: one label per cell plus a record per region.
#[derive(Clone, Debug)]
pub struct RegionMap {
    pub(crate) labels: Array2<Option<RegionId>>,
    pub(crate) regions: Vec<Region>,
}

impl RegionMap {
    /// The region `location` belongs to; [`None`] for barrier cells and locations off the grid.
    pub fn label(&self, location: Location) -> Option<RegionId> {
        self.labels.get(location.as_index()).copied().flatten()
    }

    /// All regions, indexed by id.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of cells that belong to some region.
    pub fn labeled_count(&self) -> usize {
        self.labels.iter().filter(|label| label.is_some()).count()
    }
}

impl Display for RegionMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.labels.nrows() * (self.labels.ncols() + 1));

        for row in self.labels.rows() {
            for label in row {
                // ids wrap around after z; this is only a picture
                out.push(match label {
                    Some(id) => char::from_digit((*id % 36) as u32, 36).unwrap_or('?'),
                    None => '#',
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}

enum Descent {
    Joined(RegionId),
    Floor(Location),
}

/// Partition the non-barrier cells of `grid` into regions, each tied to a local minimum.
///
/// Cells are taken in row-major order. From each unlabeled one, a depth-first descent over neighbors no higher than the current cell
/// finds the first cell, in pre-order, that either already has a label or sits on a basin floor (a level patch with no lower exit).
/// The region is then grown uphill: a neighbor joins only if it is unlabeled, not a barrier, and not lower than the cell it is reached from.
/// Labels are never overwritten, so every non-barrier cell ends up in exactly one region.
pub fn flood_fill(grid: &Grid, is_barrier: impl Fn(u32) -> bool) -> RegionMap {
    let mut labels = Array2::from_elem(grid.cells.raw_dim(), None);
    // floor status per level patch, filled in a whole patch at a time
    let mut floors = Array2::from_elem(grid.cells.raw_dim(), None);
    let mut regions: Vec<Region> = Vec::new();

    for location in grid.locations() {
        if is_barrier(grid.cells[location.as_index()].value) || labels[location.as_index()].is_some() {
            continue;
        }

        let (seed, region) = match descend(grid, &labels, &mut floors, location, &is_barrier) {
            Descent::Joined(region) => (location, region),
            Descent::Floor(minimum) => {
                let id = regions.len();
                regions.push(Region {
                    id,
                    minimum,
                    minimum_value: grid.cells[minimum.as_index()].value,
                    size: 0,
                });
                (minimum, id)
            }
        };

        regions[region].size += grow(grid, &mut labels, seed, region, &is_barrier);
    }

    debug!(regions = regions.len(), "flood fill finished");
    RegionMap { labels, regions }
}

fn descend(
    grid: &Grid,
    labels: &Array2<Option<RegionId>>,
    floors: &mut Array2<Option<bool>>,
    from: Location,
    is_barrier: &impl Fn(u32) -> bool,
) -> Descent {
    let mut visited = HashSet::from([from]);
    let mut stack = vec![from];

    while let Some(here) = stack.pop() {
        if let Some(region) = labels[here.as_index()] {
            return Descent::Joined(region);
        }
        if is_floor(grid, floors, here, is_barrier) {
            return Descent::Floor(here);
        }

        let value = grid.cells[here.as_index()].value;
        // reversed so the first neighbor in step order is explored first
        for neighbor in grid.neighbors(here).iter().rev() {
            let neighbor_value = grid.cells[neighbor.as_index()].value;
            if !is_barrier(neighbor_value) && neighbor_value <= value && visited.insert(*neighbor) {
                stack.push(*neighbor);
            }
        }
    }

    // the lowest level patch reachable from `from` is always a floor, so the loop returns first
    Descent::Floor(from)
}

// whether the level patch containing `location` has no lower non-barrier neighbor
fn is_floor(grid: &Grid, floors: &mut Array2<Option<bool>>, location: Location, is_barrier: &impl Fn(u32) -> bool) -> bool {
    if let Some(floor) = floors[location.as_index()] {
        return floor;
    }

    let value = grid.cells[location.as_index()].value;
    let mut patch = vec![location];
    let mut stack = vec![location];
    let mut floor = true;
    floors[location.as_index()] = Some(true);

    // members are marked as they are reached, then all get the outcome of the walk
    while let Some(here) = stack.pop() {
        for neighbor in grid.neighbors(here) {
            let neighbor_value = grid.cells[neighbor.as_index()].value;
            if is_barrier(neighbor_value) {
                continue;
            }
            if neighbor_value < value {
                floor = false;
            } else if neighbor_value == value && floors[neighbor.as_index()].is_none() {
                floors[neighbor.as_index()] = Some(true);
                patch.push(*neighbor);
                stack.push(*neighbor);
            }
        }
    }

    for member in patch {
        floors[member.as_index()] = Some(floor);
    }
    floor
}

fn grow(grid: &Grid, labels: &mut Array2<Option<RegionId>>, seed: Location, region: RegionId, is_barrier: &impl Fn(u32) -> bool) -> usize {
    labels[seed.as_index()] = Some(region);
    let mut grown = 1;
    let mut stack = vec![seed];

    while let Some(here) = stack.pop() {
        let value = grid.cells[here.as_index()].value;
        for neighbor in grid.neighbors(here).iter().rev() {
            let neighbor_value = grid.cells[neighbor.as_index()].value;
            if is_barrier(neighbor_value) || neighbor_value < value || labels[neighbor.as_index()].is_some() {
                continue;
            }

            labels[neighbor.as_index()] = Some(region);
            grown += 1;
            stack.push(*neighbor);
        }
    }

    grown
}
