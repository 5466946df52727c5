use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Array2;

use crate::cell::Cell;
use crate::location::{Dimension, Location};
use crate::shape::Adjacency;

/// A rectangular grid of integer-valued cells with precomputed adjacency.
///
/// [`Grid`]s should be built using a [`GridBuilder`](crate::builder::GridBuilder).
/// Cells live in a row-major arena and refer to their neighbors by [`Location`], so no cell owns or borrows another.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) cells: Array2<Cell>,
    // width, breadth
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) adjacency: Adjacency,
}

impl Grid {
    /// Wrap an array of values, indexed `(row, col)`, computing every cell's neighbors once.
    pub(crate) fn from_values(values: Array2<u32>, adjacency: Adjacency) -> Option<Self> {
        let dims = (NonZero::new(values.ncols())?, NonZero::new(values.nrows())?);
        let cells = Array2::from_shape_fn(values.raw_dim(), |ind| Cell {
            value: values[ind],
            neighbors: adjacency.neighbors_of(Location::from(ind), dims),
            triggered: false,
        });

        Some(Self { cells, dims, adjacency })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of rows.
    pub fn breadth(&self) -> usize {
        self.dims.1.get()
    }

    /// Dimensions in `(width, breadth)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The adjacency this grid was built with.
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// The value at `location`, or [`None`] if it lies outside the grid.
    pub fn value(&self, location: Location) -> Option<u32> {
        self.cells.get(location.as_index()).map(|cell| cell.value)
    }

    /// The neighbors of `location`, in step order. Empty if `location` lies outside the grid.
    pub fn neighbors(&self, location: Location) -> &[Location] {
        self.cells.get(location.as_index())
            .map(|cell| cell.neighbors.as_slice())
            .unwrap_or_default()
    }

    /// Every location in row-major order.
    pub fn locations(&self) -> impl Iterator<Item=Location> + '_ {
        self.cells.indexed_iter().map(|(ind, _)| Location::from(ind))
    }

    /// The bottom right corner.
    pub fn max_loc(&self) -> Location {
        Location(self.width() - 1, self.breadth() - 1)
    }

    pub(crate) fn values(&self) -> Array2<u32> {
        self.cells.map(|cell| cell.value)
    }

    /// Expand this grid into a `factor` by `factor` mosaic of itself.
    ///
    /// The copy at tile `(tx, ty)` has `tx + ty` added to every value, and values above 9 wrap around to 1.
    /// Adjacency is recomputed for the larger grid.
    pub fn tiled(&self, factor: Dimension) -> Self {
        let factor = factor.get();
        let (width, breadth) = (self.width(), self.breadth());
        let values = Array2::from_shape_fn((breadth * factor, width * factor), |(row, col)| {
            let base = self.cells[(row % breadth, col % width)].value;
            let bump = (row / breadth + col / width) as u32;
            if bump == 0 { base } else { (base + bump - 1) % 9 + 1 }
        });

        // both dimensions are products of non-zero numbers
        Self::from_values(values, self.adjacency).unwrap_or_else(|| self.clone())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.breadth() * (self.width() + 1));

        for row in self.cells.rows() {
            for cell in row {
                out.push_str(&cell.value.to_string());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
