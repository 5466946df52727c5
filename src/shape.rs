//! Steps between cells and the adjacency rules built from them.

use std::hash::Hash;

use itertools::Itertools;
use strum::{Display, EnumString, VariantArray};

use crate::location::{Dimension, Location};

/// A single step from one cell to an adjacent cell.
///
/// [`SquareStep`] and [`KingStep`] are the built-in implementations.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside the grid; callers check it against the grid's dimensions.
    fn attempt_from(&self, location: Location) -> Location;
}

/// The four orthogonal steps.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub enum SquareStep {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}

/// The eight steps a chess king may take, listed in reading order around the origin cell.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub enum KingStep {
    /// Up and left.
    UpLeft,
    /// One row up.
    Up,
    /// Up and right.
    UpRight,
    /// One column left.
    Left,
    /// One column right.
    Right,
    /// Down and left.
    DownLeft,
    /// One row down.
    Down,
    /// Down and right.
    DownRight,
}

impl Step for KingStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::UpLeft => location.offset_by((-1, -1)),
            Self::Up => location.offset_by((0, -1)),
            Self::UpRight => location.offset_by((1, -1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
            Self::DownLeft => location.offset_by((-1, 1)),
            Self::Down => location.offset_by((0, 1)),
            Self::DownRight => location.offset_by((1, 1)),
        }
    }
}

/// Which cells count as neighbors when a [`Grid`](crate::Grid) is built.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Adjacency {
    /// Up, down, left and right; see [`SquareStep`].
    #[default]
    Orthogonal,
    /// Orthogonal plus the four diagonals; see [`KingStep`].
    Diagonal,
}

impl Adjacency {
    /// All in-bounds neighbors of `location` on a grid of size `dims`, in step order.
    /// Cells on an edge get fewer neighbors; nothing wraps around.
    pub fn neighbors_of(&self, location: Location, dims: (Dimension, Dimension)) -> Vec<Location> {
        match self {
            Self::Orthogonal => in_bounds::<SquareStep>(location, dims),
            Self::Diagonal => in_bounds::<KingStep>(location, dims),
        }
    }
}

fn in_bounds<St: Step>(location: Location, dims: (Dimension, Dimension)) -> Vec<Location> {
    St::VARIANTS.iter()
        .map(|dir| dir.attempt_from(location))
        .filter(|neighbor| neighbor.within(dims))
        .collect_vec()
}
